use std::time::Duration;

use records::{
    ClimateRecord, DisasterRecord, EnvironmentalRecord, NewClimateRecord, NewDisasterRecord,
    NewEnvironmentalRecord, SyncStatus, SyncSummary,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::{Backend, BoxFuture, ClimateQuery, DisasterQuery, EnvironmentalQuery};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API not configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Where the API lives and the key it expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub key: String,
}

fn configured(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty() && *v != "undefined")
}

impl ApiConfig {
    /// `None` unless both the URL and the key are usable. Empty values and
    /// the literal `undefined` count as missing.
    pub fn new(base_url: Option<&str>, key: Option<&str>) -> Option<Self> {
        Some(Self {
            base_url: configured(base_url)?.trim_end_matches('/').to_string(),
            key: configured(key)?.to_string(),
        })
    }

    pub fn functions_url(&self) -> String {
        format!("{}/functions/v1", self.base_url)
    }
}

/// Status line shown in the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SyncSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub using_mock_data: bool,
}

impl ApiStatus {
    pub fn from_result(result: Result<SyncStatus, ApiError>) -> Self {
        match result {
            Ok(sync) => Self {
                status: sync.status,
                summary: Some(sync.summary),
                error: None,
                using_mock_data: false,
            },
            Err(ApiError::NotConfigured) => Self {
                status: "API not configured".to_string(),
                summary: None,
                error: None,
                using_mock_data: true,
            },
            Err(err) => Self {
                status: "API unavailable".to_string(),
                summary: None,
                error: Some(match err {
                    ApiError::Status { body, .. } => body,
                    other => other.to_string(),
                }),
                using_mock_data: true,
            },
        }
    }
}

/// [`Backend`] over the HTTP functions API.
pub struct HttpBackend {
    client: Client,
    config: Option<ApiConfig>,
}

impl HttpBackend {
    pub fn new(config: Option<ApiConfig>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn request(&self, method: reqwest::Method, resource: &str) -> Result<RequestBuilder, ApiError> {
        let cfg = self.config.as_ref().ok_or(ApiError::NotConfigured)?;
        Ok(self
            .client
            .request(method, format!("{}/{resource}", cfg.functions_url()))
            .bearer_auth(&cfg.key)
            .header("apikey", &cfg.key))
    }

    async fn send<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json().await?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<T, ApiError> {
        let req = self.request(reqwest::Method::GET, resource)?.query(&params);
        Self::send(req).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        resource: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.request(reqwest::Method::POST, resource)?.json(body);
        Self::send(req).await
    }
}

impl Backend for HttpBackend {
    fn climate(&self, query: ClimateQuery) -> BoxFuture<'_, Result<Vec<ClimateRecord>, ApiError>> {
        Box::pin(async move { self.get("climate-data", query.params()).await })
    }

    fn disasters(
        &self,
        query: DisasterQuery,
    ) -> BoxFuture<'_, Result<Vec<DisasterRecord>, ApiError>> {
        Box::pin(async move { self.get("disasters", query.params()).await })
    }

    fn environmental(
        &self,
        query: EnvironmentalQuery,
    ) -> BoxFuture<'_, Result<Vec<EnvironmentalRecord>, ApiError>> {
        Box::pin(async move { self.get("environmental-data", query.params()).await })
    }

    fn status(&self) -> BoxFuture<'_, Result<SyncStatus, ApiError>> {
        Box::pin(async move { self.get("data-sync", Vec::new()).await })
    }

    fn seed(&self) -> BoxFuture<'_, Result<(), ApiError>> {
        Box::pin(async move {
            let req = self
                .request(reqwest::Method::POST, "data-sync")?
                .query(&[("action", "seed")]);
            let _: serde_json::Value = Self::send(req).await?;
            Ok(())
        })
    }

    fn add_climate(
        &self,
        record: NewClimateRecord,
    ) -> BoxFuture<'_, Result<ClimateRecord, ApiError>> {
        Box::pin(async move { self.post("climate-data", &record).await })
    }

    fn report_disaster(
        &self,
        record: NewDisasterRecord,
    ) -> BoxFuture<'_, Result<DisasterRecord, ApiError>> {
        Box::pin(async move { self.post("disasters", &record).await })
    }

    fn add_environmental(
        &self,
        record: NewEnvironmentalRecord,
    ) -> BoxFuture<'_, Result<EnvironmentalRecord, ApiError>> {
        Box::pin(async move { self.post("environmental-data", &record).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_and_empty_mean_not_configured() {
        assert_eq!(ApiConfig::new(None, Some("k")), None);
        assert_eq!(ApiConfig::new(Some("undefined"), Some("k")), None);
        assert_eq!(ApiConfig::new(Some("http://x"), Some("  ")), None);
        let cfg = ApiConfig::new(Some("http://localhost:54321/"), Some("anon")).unwrap();
        assert_eq!(cfg.functions_url(), "http://localhost:54321/functions/v1");
    }

    #[tokio::test]
    async fn unconfigured_backend_fails_fast() {
        let backend = HttpBackend::new(None).unwrap();
        let err = backend.climate(ClimateQuery::limited(50)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotConfigured));
        assert!(matches!(backend.seed().await, Err(ApiError::NotConfigured)));
    }

    #[test]
    fn status_from_failures() {
        let s = ApiStatus::from_result(Err(ApiError::NotConfigured));
        assert!(s.using_mock_data);
        assert_eq!(s.status, "API not configured");

        let s = ApiStatus::from_result(Err(ApiError::Status {
            status: 503,
            body: "maintenance".into(),
        }));
        assert_eq!(s.status, "API unavailable");
        assert_eq!(s.error.as_deref(), Some("maintenance"));
    }

    #[test]
    fn status_from_success() {
        let s = ApiStatus::from_result(Ok(SyncStatus {
            summary: SyncSummary {
                climate_records: 3,
                disaster_records: 1,
                environmental_records: 2,
            },
            status: "API is running".into(),
        }));
        assert!(!s.using_mock_data);
        assert_eq!(s.summary.map(|x| x.total()), Some(6));
    }
}
