use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which dataset (and visual encoding) is active.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Temperature,
    Disasters,
    Environmental,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Temperature,
        Category::Disasters,
        Category::Environmental,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Temperature => "temperature",
            Category::Disasters => "disasters",
            Category::Environmental => "environmental",
        }
    }

    /// API resource serving this category.
    pub fn resource(self) -> &'static str {
        match self {
            Category::Temperature => "climate-data",
            Category::Disasters => "disasters",
            Category::Environmental => "environmental-data",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "temperature" | "climate" => Ok(Category::Temperature),
            "disasters" | "disaster" => Ok(Category::Disasters),
            "environmental" | "environment" => Ok(Category::Environmental),
            other => Err(format!(
                "unknown category '{other}' (expected temperature, disasters or environmental)"
            )),
        }
    }
}
