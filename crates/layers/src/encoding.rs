//! Per-record visual encoding: which legend bucket a record falls in, how
//! intense it is, what its tooltip says and whether two records of the same
//! kind are linked on the map.

use records::{ClimateRecord, DisasterRecord, EnvironmentalRecord, Record};

use crate::symbology::{Rgb, style};

/// Upper bounds (exclusive) of the Very Cold, Cold, Mild and Warm buckets, °C.
pub const TEMPERATURE_BOUNDS: [f64; 4] = [0.0, 10.0, 20.0, 30.0];
/// Upper bounds (inclusive) of the Good .. Unhealthy AQI buckets.
pub const AQI_BOUNDS: [f64; 4] = [50.0, 100.0, 150.0, 200.0];

/// Temperature at which intensity reaches 0, and the span to reach 1.
pub const TEMPERATURE_FLOOR_C: f64 = -10.0;
pub const TEMPERATURE_SPAN_C: f64 = 50.0;
/// AQI at which intensity saturates.
pub const AQI_SATURATION: f64 = 200.0;
/// Intensity per severity rank (Low, Medium, High).
pub const SEVERITY_INTENSITY: [f64; 3] = [0.3, 0.6, 1.0];

pub const CLIMATE_LINK_KM: f64 = 3000.0;
pub const CLIMATE_CONTRAST_C: f64 = 15.0;
pub const ENVIRONMENTAL_LINK_KM: f64 = 2500.0;
pub const SIMILAR_AQI: f64 = 30.0;

pub const MARKER_BASE_SIZE: f64 = 4.0;
pub const MARKER_SIZE_RANGE: f64 = 6.0;

/// Marker diameter for an intensity; the intensity is clamped first.
pub fn marker_size(intensity: f64) -> f64 {
    MARKER_BASE_SIZE + intensity.clamp(0.0, 1.0) * MARKER_SIZE_RANGE
}

fn bucket_below(value: f64, bounds: &[f64]) -> usize {
    bounds.iter().position(|b| value < *b).unwrap_or(bounds.len())
}

fn bucket_at_most(value: f64, bounds: &[f64]) -> usize {
    bounds.iter().position(|b| value <= *b).unwrap_or(bounds.len())
}

/// Pure mapping from a record to its visual attributes.
pub trait VisualEncoding: Record {
    /// Index into the category legend.
    fn bucket(&self) -> usize;

    /// Normalized `[0, 1]` strength.
    fn intensity(&self) -> f64;

    /// Whether the map draws a connection between `self` and `other`.
    /// Symmetric.
    fn connects(&self, other: &Self) -> bool;

    fn headline(&self) -> String;

    fn detail(&self) -> String;

    fn color(&self) -> Rgb {
        let legend = style(Self::CATEGORY).legend;
        legend[self.bucket().min(legend.len() - 1)].color
    }

    fn bucket_label(&self) -> &'static str {
        let legend = style(Self::CATEGORY).legend;
        legend[self.bucket().min(legend.len() - 1)].label
    }

    fn size(&self) -> f64 {
        marker_size(self.intensity())
    }
}

impl VisualEncoding for ClimateRecord {
    fn bucket(&self) -> usize {
        bucket_below(self.temperature, &TEMPERATURE_BOUNDS)
    }

    fn intensity(&self) -> f64 {
        ((self.temperature - TEMPERATURE_FLOOR_C) / TEMPERATURE_SPAN_C).clamp(0.0, 1.0)
    }

    fn connects(&self, other: &Self) -> bool {
        self.point().distance_km(other.point()) < CLIMATE_LINK_KM
            || (self.temperature - other.temperature).abs() > CLIMATE_CONTRAST_C
    }

    fn headline(&self) -> String {
        format!("{}°C", self.temperature)
    }

    fn detail(&self) -> String {
        format!(
            "{}% humidity • {} km/h wind",
            self.humidity, self.wind_speed
        )
    }
}

impl VisualEncoding for DisasterRecord {
    /// Unrecognized severities share the Low bucket.
    fn bucket(&self) -> usize {
        self.severity.rank()
    }

    fn intensity(&self) -> f64 {
        SEVERITY_INTENSITY[self.severity.rank()]
    }

    fn connects(&self, other: &Self) -> bool {
        self.kind == other.kind || (self.severity.is_high() && other.severity.is_high())
    }

    fn headline(&self) -> String {
        self.kind.clone()
    }

    fn detail(&self) -> String {
        format!("{} severity", self.severity)
    }
}

impl VisualEncoding for EnvironmentalRecord {
    fn bucket(&self) -> usize {
        bucket_at_most(self.air_quality, &AQI_BOUNDS)
    }

    fn intensity(&self) -> f64 {
        (self.air_quality / AQI_SATURATION).clamp(0.0, 1.0)
    }

    fn connects(&self, other: &Self) -> bool {
        self.point().distance_km(other.point()) < ENVIRONMENTAL_LINK_KM
            || (self.air_quality - other.air_quality).abs() < SIMILAR_AQI
    }

    fn headline(&self) -> String {
        format!("AQI {}", self.air_quality)
    }

    fn detail(&self) -> String {
        format!(
            "CO2 {}ppm • Pollution {}/10",
            self.co2_level, self.pollution_index
        )
    }
}
