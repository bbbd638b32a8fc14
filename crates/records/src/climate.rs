use chrono::{DateTime, Utc};
use foundation::math::GeoPoint;
use serde::{Deserialize, Serialize};

use crate::{Category, Record, lenient};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateRecord {
    pub id: String,
    pub location: String,
    #[serde(deserialize_with = "lenient::number")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub lng: f64,
    /// Degrees Celsius.
    #[serde(deserialize_with = "lenient::number")]
    pub temperature: f64,
    /// Relative humidity, percent.
    #[serde(deserialize_with = "lenient::number")]
    pub humidity: f64,
    /// km/h.
    #[serde(deserialize_with = "lenient::number")]
    pub wind_speed: f64,
    pub timestamp: DateTime<Utc>,
}

/// Body of a climate insert; the server fills in `id` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClimateRecord {
    pub location: String,
    pub lat: f64,
    pub lng: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

impl NewClimateRecord {
    pub fn into_record(self, id: impl Into<String>, timestamp: DateTime<Utc>) -> ClimateRecord {
        ClimateRecord {
            id: id.into(),
            location: self.location,
            lat: self.lat,
            lng: self.lng,
            temperature: self.temperature,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            timestamp,
        }
    }
}

impl Record for ClimateRecord {
    const CATEGORY: Category = Category::Temperature;

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
