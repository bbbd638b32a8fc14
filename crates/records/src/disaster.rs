use chrono::{DateTime, Utc};
use foundation::math::GeoPoint;
use serde::{Deserialize, Serialize};

use crate::{Category, Record, Severity, lenient};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterRecord {
    pub id: String,
    /// Free-text event kind, e.g. "Hurricane".
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    #[serde(deserialize_with = "lenient::number")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub lng: f64,
    pub severity: Severity,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDisasterRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    pub lat: f64,
    pub lng: f64,
    pub severity: Severity,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
}

impl NewDisasterRecord {
    pub fn into_record(self, id: impl Into<String>, timestamp: DateTime<Utc>) -> DisasterRecord {
        DisasterRecord {
            id: id.into(),
            kind: self.kind,
            location: self.location,
            lat: self.lat,
            lng: self.lng,
            severity: self.severity,
            description: self.description,
            timestamp,
        }
    }
}

impl Record for DisasterRecord {
    const CATEGORY: Category = Category::Disasters;

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
    use super::{DisasterRecord, NewDisasterRecord};
    use crate::Severity;

    #[test]
    fn kind_travels_as_type() {
        let body = r#"{"type":"Flood","location":"Lagos","lat":6.52,"lng":3.38,"severity":"Medium"}"#;
        let new: NewDisasterRecord = serde_json::from_str(body).unwrap();
        assert_eq!(new.kind, "Flood");
        assert_eq!(new.severity, Severity::Medium);
        assert_eq!(new.description, "");

        let rec = new.into_record("d-1", chrono::Utc::now());
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "Flood");
        assert!(json.get("kind").is_none());

        let back: DisasterRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn null_description_keeps_the_batch() {
        let rows = r#"[
            {"id":"a","type":"Flood","location":"Lagos","lat":6.52,"lng":3.38,
             "severity":"High","description":"ok","timestamp":"2026-10-16T08:00:00Z"},
            {"id":"b","type":"Wildfire","location":"Sydney","lat":"-33.87","lng":151.21,
             "severity":"Low","description":null,"timestamp":"2026-10-16T09:00:00Z"}
        ]"#;
        let batch: Vec<DisasterRecord> = serde_json::from_str(rows).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].description, "ok");
        assert_eq!(batch[1].description, "");
        assert_eq!(batch[1].lat, -33.87);
    }
}
