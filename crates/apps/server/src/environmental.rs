use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use records::{EnvironmentalRecord, NewEnvironmentalRecord};
use tracing::info;
use uuid::Uuid;

use crate::error::{decode_body, ApiError};
use crate::params::EnvironmentalQuery;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EnvironmentalQuery>,
) -> Result<Json<Vec<EnvironmentalRecord>>, ApiError> {
    let page = query.page();
    let location = query.location();
    let (min_aqi, max_aqi) = query.aqi_range();
    let rows = state.store.select(
        page.since(Utc::now()),
        page.limit,
        |r: &EnvironmentalRecord| {
            location.map_or(true, |l| r.location == l)
                && min_aqi.map_or(true, |min| r.air_quality >= min)
                && max_aqi.map_or(true, |max| r.air_quality <= max)
        },
    );
    Ok(Json(rows))
}

pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<EnvironmentalRecord>), ApiError> {
    let new: NewEnvironmentalRecord = decode_body(&body)?;
    let record = new.into_record(Uuid::new_v4().to_string(), Utc::now());
    info!(id = %record.id, location = %record.location, aqi = record.air_quality, "air reading added");
    let mut saved = state.store.insert(vec![record]).await?;
    Ok((StatusCode::CREATED, Json(saved.remove(0))))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};

    use super::*;
    use crate::tests::test_state;

    fn reading(location: &str, aqi: f64) -> EnvironmentalRecord {
        NewEnvironmentalRecord {
            location: location.into(),
            lat: 19.07,
            lng: 72.88,
            air_quality: aqi,
            co2_level: 430.0,
            pollution_index: 5.0,
        }
        .into_record(format!("{location}-{aqi}"), Utc::now() - TimeDelta::minutes(aqi as i64))
    }

    #[tokio::test]
    async fn aqi_range_is_inclusive() {
        let state = test_state();
        state
            .store
            .insert(vec![
                reading("Mumbai", 49.0),
                reading("Mumbai", 50.0),
                reading("Mumbai", 120.0),
                reading("Delhi", 150.0),
                reading("Delhi", 151.0),
            ])
            .await
            .unwrap();

        let Json(rows) = list(
            State(state.clone()),
            Query(EnvironmentalQuery {
                min_aqi: Some("50".into()),
                max_aqi: Some("150".into()),
                ..EnvironmentalQuery::default()
            }),
        )
        .await
        .unwrap();
        let aqi: Vec<f64> = rows.iter().map(|r| r.air_quality).collect();
        assert_eq!(aqi, vec![50.0, 120.0, 150.0]);

        let Json(delhi) = list(
            State(state),
            Query(EnvironmentalQuery {
                location: Some("Delhi".into()),
                min_aqi: Some("not-a-number".into()),
                ..EnvironmentalQuery::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(delhi.len(), 2);
    }
}
