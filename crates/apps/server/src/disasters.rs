use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use records::{DisasterRecord, NewDisasterRecord};
use tracing::info;
use uuid::Uuid;

use crate::error::{decode_body, ApiError};
use crate::params::DisasterQuery;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DisasterQuery>,
) -> Result<Json<Vec<DisasterRecord>>, ApiError> {
    let page = query.page();
    let severity = query.severity();
    let kind = query.kind();
    let rows = state
        .store
        .select(page.since(Utc::now()), page.limit, |r: &DisasterRecord| {
            severity.map_or(true, |s| r.severity.as_str() == s)
                && kind.map_or(true, |k| r.kind == k)
        });
    Ok(Json(rows))
}

pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<DisasterRecord>), ApiError> {
    let new: NewDisasterRecord = decode_body(&body)?;
    let record = new.into_record(Uuid::new_v4().to_string(), Utc::now());
    info!(
        id = %record.id,
        kind = %record.kind,
        severity = %record.severity,
        "disaster reported"
    );
    let mut saved = state.store.insert(vec![record]).await?;
    Ok((StatusCode::CREATED, Json(saved.remove(0))))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use records::NewDisasterRecord;

    use super::*;
    use crate::tests::test_state;

    fn event(kind: &str, severity: &str, age_hours: i64) -> DisasterRecord {
        NewDisasterRecord {
            kind: kind.into(),
            location: "Manila".into(),
            lat: 14.6,
            lng: 121.0,
            severity: severity.into(),
            description: String::new(),
        }
        .into_record(
            format!("{kind}-{age_hours}"),
            Utc::now() - TimeDelta::hours(age_hours),
        )
    }

    #[tokio::test]
    async fn filters_by_severity_type_and_window() {
        let state = test_state();
        state
            .store
            .insert(vec![
                event("Flood", "High", 2),
                event("Flood", "Low", 3),
                event("Tornado", "High", 10),
                event("Flood", "High", 80),
            ])
            .await
            .unwrap();

        let Json(high) = list(
            State(state.clone()),
            Query(DisasterQuery {
                severity: Some("High".into()),
                ..DisasterQuery::default()
            }),
        )
        .await
        .unwrap();
        let ids: Vec<&str> = high.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["Flood-2", "Tornado-10"]);

        let Json(floods) = list(
            State(state),
            Query(DisasterQuery {
                kind: Some("Flood".into()),
                limit: Some("1".into()),
                ..DisasterQuery::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(floods.len(), 1);
        assert_eq!(floods[0].id, "Flood-2");
    }

    #[tokio::test]
    async fn undecodable_body_is_500() {
        let state = test_state();
        let err = create(State(state), Bytes::from_static(b"{\"type\": 3}"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
