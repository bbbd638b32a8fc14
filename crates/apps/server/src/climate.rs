use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use records::{ClimateRecord, NewClimateRecord};
use tracing::info;
use uuid::Uuid;

use crate::error::{decode_body, ApiError};
use crate::params::ClimateQuery;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ClimateQuery>,
) -> Result<Json<Vec<ClimateRecord>>, ApiError> {
    let page = query.page();
    let location = query.location();
    let rows = state
        .store
        .select(page.since(Utc::now()), page.limit, |r: &ClimateRecord| {
            location.map_or(true, |l| r.location == l)
        });
    Ok(Json(rows))
}

pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ClimateRecord>), ApiError> {
    let new: NewClimateRecord = decode_body(&body)?;
    let record = new.into_record(Uuid::new_v4().to_string(), Utc::now());
    info!(id = %record.id, location = %record.location, "climate reading added");
    let mut saved = state.store.insert(vec![record]).await?;
    Ok((StatusCode::CREATED, Json(saved.remove(0))))
}
