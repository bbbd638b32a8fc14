//! Query-string parsing. Values that do not parse fall back to the default
//! (or to "no filter") instead of failing the request.

use chrono::{DateTime, Utc};
use compute::TimeWindow;
use serde::Deserialize;

pub const DEFAULT_LIMIT: usize = 100;
pub const CLIMATE_HOURS: i64 = 24;
pub const DISASTER_HOURS: i64 = 72;
pub const ENVIRONMENTAL_HOURS: i64 = 24;

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn non_empty(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().filter(|v| !v.is_empty())
}

/// `limit` and `hours`, shared by every list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub hours: i64,
}

impl Page {
    fn parse(limit: &Option<String>, hours: &Option<String>, default_hours: i64) -> Self {
        Self {
            limit: parse_or(limit.as_deref(), DEFAULT_LIMIT),
            hours: parse_or(hours.as_deref(), default_hours),
        }
    }

    pub fn since(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        TimeWindow::last_hours(now, self.hours).start
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ClimateQuery {
    pub location: Option<String>,
    pub limit: Option<String>,
    pub hours: Option<String>,
}

impl ClimateQuery {
    pub fn page(&self) -> Page {
        Page::parse(&self.limit, &self.hours, CLIMATE_HOURS)
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(&self.location)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DisasterQuery {
    pub severity: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<String>,
    pub hours: Option<String>,
}

impl DisasterQuery {
    pub fn page(&self) -> Page {
        Page::parse(&self.limit, &self.hours, DISASTER_HOURS)
    }

    pub fn severity(&self) -> Option<&str> {
        non_empty(&self.severity)
    }

    pub fn kind(&self) -> Option<&str> {
        non_empty(&self.kind)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EnvironmentalQuery {
    pub location: Option<String>,
    pub limit: Option<String>,
    pub hours: Option<String>,
    pub min_aqi: Option<String>,
    pub max_aqi: Option<String>,
}

impl EnvironmentalQuery {
    pub fn page(&self) -> Page {
        Page::parse(&self.limit, &self.hours, ENVIRONMENTAL_HOURS)
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(&self.location)
    }

    /// Inclusive AQI bounds; unparseable bounds are dropped.
    pub fn aqi_range(&self) -> (Option<f64>, Option<f64>) {
        let bound = |raw: &Option<String>| non_empty(raw).and_then(|v| v.trim().parse().ok());
        (bound(&self.min_aqi), bound(&self.max_aqi))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SyncQuery {
    pub action: Option<String>,
}
