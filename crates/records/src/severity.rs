use std::fmt;

use serde::{Deserialize, Serialize};

/// Disaster severity literal.
///
/// Only `Low`, `Medium` and `High` (case-sensitive) are recognized. Anything
/// else is kept verbatim so it round-trips, and is treated as the Low tier
/// wherever a tier is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Low,
    Medium,
    High,
    Unrecognized(String),
}

impl Severity {
    pub const LEVELS: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    pub fn as_str(&self) -> &str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Unrecognized(raw) => raw,
        }
    }

    /// 0 = Low, 1 = Medium, 2 = High. Unrecognized values rank as Low.
    pub fn rank(&self) -> usize {
        match self {
            Severity::High => 2,
            Severity::Medium => 1,
            Severity::Low | Severity::Unrecognized(_) => 0,
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Severity::High)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Severity::Unrecognized(_))
    }
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Low" => Severity::Low,
            "Medium" => Severity::Medium,
            "High" => Severity::High,
            _ => Severity::Unrecognized(raw),
        }
    }
}

impl From<&str> for Severity {
    fn from(raw: &str) -> Self {
        Severity::from(raw.to_string())
    }
}

impl From<Severity> for String {
    fn from(s: Severity) -> Self {
        match s {
            Severity::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
