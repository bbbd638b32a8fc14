use serde::{Deserialize, Serialize};

/// Row counts per table, as reported by `GET data-sync`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub climate_records: usize,
    pub disaster_records: usize,
    pub environmental_records: usize,
}

impl SyncSummary {
    pub fn total(&self) -> usize {
        self.climate_records + self.disaster_records + self.environmental_records
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub summary: SyncSummary,
    pub status: String,
}

/// Outcome of `POST data-sync?action=update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResults {
    pub updated: usize,
    /// One message per row that could not be updated.
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_decodes_from_api_body() {
        let body = r#"{"summary":{"climate_records":10,"disaster_records":4,"environmental_records":10},"status":"API is running"}"#;
        let status: SyncStatus = serde_json::from_str(body).unwrap();
        assert_eq!(status.summary.total(), 24);
        assert_eq!(status.status, "API is running");
    }
}
