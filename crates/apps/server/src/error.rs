use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Every failure a handler can report. Rendered as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    InvalidBody(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),
    #[error("Missing bearer token")]
    Unauthorized,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(_) | Self::InvalidBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed | Self::UnsupportedAction(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Decodes a JSON request body regardless of its `Content-Type` header.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(format!("Invalid JSON body: {e}")))
}

pub fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message.into() })))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {self}");
        }
        api_error(status, self.to_string()).into_response()
    }
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
