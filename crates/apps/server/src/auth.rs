use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::AppState;

/// Only checks that a bearer token is present; the token itself is not
/// verified.
pub fn has_bearer(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty())
}

pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.config.require_auth && !has_bearer(request.headers()) {
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn bearer_presence() {
        let mut headers = HeaderMap::new();
        assert!(!has_bearer(&headers));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(!has_bearer(&headers));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(!has_bearer(&headers));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer anon-key"));
        assert!(has_bearer(&headers));
    }
}
