use foundation::math::project_mercator;
use serde::Serialize;

use crate::encoding::VisualEncoding;
use crate::symbology::Rgb;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub title: String,
    pub headline: String,
    pub detail: String,
    /// `HH:MM:SS` in UTC.
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    /// Plot position in percent of the map's width and height.
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
    pub intensity: f64,
    pub size: f64,
    pub tooltip: Tooltip,
}

impl Marker {
    pub fn from_record<R: VisualEncoding>(record: &R) -> Self {
        let position = project_mercator(record.point());
        Self {
            id: record.id().to_string(),
            x: position.x,
            y: position.y,
            color: record.color(),
            intensity: record.intensity(),
            size: record.size(),
            tooltip: Tooltip {
                title: record.location().to_string(),
                headline: record.headline(),
                detail: record.detail(),
                time: record.timestamp().format("%H:%M:%S").to_string(),
            },
        }
    }
}

/// One marker per record, in input order.
pub fn markers<R: VisualEncoding>(records: &[R]) -> Vec<Marker> {
    records.iter().map(Marker::from_record).collect()
}
