use chrono::{DateTime, Utc};
use foundation::math::GeoPoint;
use serde::{Deserialize, Serialize};

use crate::{Category, Record, lenient};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalRecord {
    pub id: String,
    pub location: String,
    #[serde(deserialize_with = "lenient::number")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub lng: f64,
    /// AQI, 0 (good) to 500+.
    #[serde(deserialize_with = "lenient::number")]
    pub air_quality: f64,
    /// ppm.
    #[serde(deserialize_with = "lenient::number")]
    pub co2_level: f64,
    /// 0 to 10.
    #[serde(deserialize_with = "lenient::number")]
    pub pollution_index: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEnvironmentalRecord {
    pub location: String,
    pub lat: f64,
    pub lng: f64,
    pub air_quality: f64,
    pub co2_level: f64,
    pub pollution_index: f64,
}

impl NewEnvironmentalRecord {
    pub fn into_record(
        self,
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> EnvironmentalRecord {
        EnvironmentalRecord {
            id: id.into(),
            location: self.location,
            lat: self.lat,
            lng: self.lng,
            air_quality: self.air_quality,
            co2_level: self.co2_level,
            pollution_index: self.pollution_index,
            timestamp,
        }
    }
}

impl Record for EnvironmentalRecord {
    const CATEGORY: Category = Category::Environmental;

    fn id(&self) -> &str {
        &self.id
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn insert_body_becomes_row() {
        let body = r#"{"location":"Delhi","lat":28.7041,"lng":77.1025,"air_quality":182,"co2_level":455,"pollution_index":7.3}"#;
        let new: NewEnvironmentalRecord = serde_json::from_str(body).unwrap();
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let rec = new.into_record("env-1", ts);
        assert_eq!(
            rec,
            EnvironmentalRecord {
                id: "env-1".into(),
                location: "Delhi".into(),
                lat: 28.7041,
                lng: 77.1025,
                air_quality: 182.0,
                co2_level: 455.0,
                pollution_index: 7.3,
                timestamp: ts,
            }
        );
        assert_eq!(rec.point(), GeoPoint::new(28.7041, 77.1025));
    }
}
