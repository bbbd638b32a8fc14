//! Row counts, demo seeding and bulk refresh of climate readings.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use records::mock::{self, seed_locations};
use records::{
    ClimateRecord, DisasterRecord, EnvironmentalRecord, SyncStatus, UpdateResults,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::params::SyncQuery;
use crate::AppState;

/// Climate rows refreshed by one `update` call.
pub const UPDATE_BATCH: usize = 5;

#[derive(Debug, Serialize)]
pub struct SeedResults {
    pub climate: Vec<ClimateRecord>,
    pub disasters: Vec<DisasterRecord>,
    pub environmental: Vec<EnvironmentalRecord>,
}

#[derive(Debug, Serialize)]
pub struct SyncResponse<T> {
    pub message: &'static str,
    pub results: T,
}

pub async fn status(State(state): State<AppState>) -> Json<SyncStatus> {
    Json(SyncStatus {
        summary: state.store.summary(),
        status: "API is running".to_string(),
    })
}

pub async fn run(
    State(state): State<AppState>,
    Query(query): Query<SyncQuery>,
) -> Result<Response, ApiError> {
    match query.action.as_deref() {
        Some("seed") => {
            let results = seed(&state).await?;
            Ok((
                StatusCode::CREATED,
                Json(SyncResponse {
                    message: "Database seeded successfully",
                    results,
                }),
            )
                .into_response())
        }
        Some("update") => {
            let results = update(&state).await?;
            Ok(Json(SyncResponse {
                message: "Data updated successfully",
                results,
            })
            .into_response())
        }
        other => Err(ApiError::UnsupportedAction(
            other.unwrap_or_default().to_string(),
        )),
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

async fn seed(state: &AppState) -> Result<SeedResults, ApiError> {
    let mut rng = SmallRng::from_entropy();
    let now = Utc::now();
    let locations = seed_locations();

    let climate: Vec<ClimateRecord> = locations
        .iter()
        .map(|at| mock::random_climate(&mut rng, at).into_record(new_id(), now))
        .collect();

    let disaster_count = rng.gen_range(3..=7);
    let disasters: Vec<DisasterRecord> = (0..disaster_count)
        .map(|_| {
            let ts = mock::seed_disaster_time(&mut rng, now);
            mock::random_disaster(&mut rng, locations).into_record(new_id(), ts)
        })
        .collect();

    let environmental: Vec<EnvironmentalRecord> = locations
        .iter()
        .map(|at| mock::random_environmental(&mut rng, at).into_record(new_id(), now))
        .collect();

    let results = SeedResults {
        climate: state.store.insert(climate).await?,
        disasters: state.store.insert(disasters).await?,
        environmental: state.store.insert(environmental).await?,
    };
    info!(
        climate = results.climate.len(),
        disasters = results.disasters.len(),
        environmental = results.environmental.len(),
        "seeded tables"
    );
    Ok(results)
}

async fn update(state: &AppState) -> Result<UpdateResults, ApiError> {
    let mut rng = SmallRng::from_entropy();
    let now = Utc::now();
    let updated = state
        .store
        .update_first::<ClimateRecord>(UPDATE_BATCH, |row| {
            mock::refresh_climate(&mut rng, row, now)
        })
        .await?;
    info!(updated, "refreshed climate readings");
    Ok(UpdateResults {
        updated,
        errors: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::tests::body_json;
    use crate::tests::test_state;

    fn action(name: &str) -> Query<SyncQuery> {
        Query(SyncQuery {
            action: Some(name.to_string()),
        })
    }

    #[tokio::test]
    async fn seed_then_summary() {
        let state = test_state();
        let resp = run(State(state.clone()), action("seed")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Database seeded successfully");
        assert_eq!(body["results"]["climate"].as_array().unwrap().len(), 10);

        let Json(sync) = status(State(state)).await;
        assert_eq!(sync.status, "API is running");
        assert_eq!(sync.summary.climate_records, 10);
        assert_eq!(sync.summary.environmental_records, 10);
        assert!((3..=7).contains(&sync.summary.disaster_records));
    }

    #[tokio::test]
    async fn update_touches_at_most_five() {
        let state = test_state();
        run(State(state.clone()), action("seed")).await.unwrap();
        let resp = run(State(state), action("update")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["results"]["updated"], 5);
        assert_eq!(body["results"]["errors"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn update_on_empty_store_updates_nothing() {
        let resp = run(State(test_state()), action("update")).await.unwrap();
        assert_eq!(body_json(resp).await["results"]["updated"], 0);
    }

    #[tokio::test]
    async fn unknown_action_is_405() {
        let err = run(State(test_state()), action("purge")).await.unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        let missing = run(State(test_state()), Query(SyncQuery::default()))
            .await
            .unwrap_err();
        assert_eq!(missing.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
