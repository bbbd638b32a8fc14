//! Headline numbers shown in the dashboard's statistics panel.

use records::{ClimateRecord, DisasterRecord, EnvironmentalRecord, Severity, Snapshot};
use serde::{Deserialize, Serialize};

use crate::analysis::{Statistics, Summary};

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimateOverview {
    pub temperature: Summary,
    pub mean_humidity: f64,
    pub mean_wind_speed: f64,
}

impl ClimateOverview {
    pub fn from_records(records: &[ClimateRecord]) -> Self {
        let temps: Vec<f64> = records.iter().map(|r| r.temperature).collect();
        Self {
            temperature: Statistics::summarize(&temps),
            mean_humidity: Statistics::mean_by(records, |r| r.humidity),
            mean_wind_speed: Statistics::mean_by(records, |r| r.wind_speed),
        }
    }
}

/// Disaster counts per severity bucket.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisasterOverview {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unrecognized: usize,
    pub total: usize,
}

impl DisasterOverview {
    pub fn from_records(records: &[DisasterRecord]) -> Self {
        let mut out = Self {
            total: records.len(),
            ..Self::default()
        };
        for r in records {
            match r.severity {
                Severity::High => out.high += 1,
                Severity::Medium => out.medium += 1,
                Severity::Low => out.low += 1,
                Severity::Unrecognized(_) => out.unrecognized += 1,
            }
        }
        out
    }

    /// Events that warrant an alert.
    pub fn active(&self) -> usize {
        self.high
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalOverview {
    pub air_quality: Summary,
    pub mean_co2: f64,
    pub mean_pollution: f64,
}

impl EnvironmentalOverview {
    pub fn from_records(records: &[EnvironmentalRecord]) -> Self {
        let aqi: Vec<f64> = records.iter().map(|r| r.air_quality).collect();
        Self {
            air_quality: Statistics::summarize(&aqi),
            mean_co2: Statistics::mean_by(records, |r| r.co2_level),
            mean_pollution: Statistics::mean_by(records, |r| r.pollution_index),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub climate: ClimateOverview,
    pub disasters: DisasterOverview,
    pub environmental: EnvironmentalOverview,
}

impl Overview {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            climate: ClimateOverview::from_records(&snapshot.climate),
            disasters: DisasterOverview::from_records(&snapshot.disasters),
            environmental: EnvironmentalOverview::from_records(&snapshot.environmental),
        }
    }
}
