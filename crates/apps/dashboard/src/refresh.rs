//! One fetch cycle: four concurrent requests, with each category falling back
//! to synthetic rows on its own.

use std::sync::Arc;

use chrono::Utc;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use records::{mock, Category, Snapshot};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::api::{ApiError, ApiStatus};
use crate::backend::{Backend, ClimateQuery, DisasterQuery, EnvironmentalQuery};

/// Rows requested per category each cycle.
pub const FETCH_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Provenance {
    Live,
    Mock { reason: String },
}

impl Provenance {
    pub fn is_mock(&self) -> bool {
        matches!(self, Provenance::Mock { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sources {
    pub climate: Provenance,
    pub disasters: Provenance,
    pub environmental: Provenance,
}

impl Sources {
    pub fn get(&self, category: Category) -> &Provenance {
        match category {
            Category::Temperature => &self.climate,
            Category::Disasters => &self.disasters,
            Category::Environmental => &self.environmental,
        }
    }

    pub fn any_mock(&self) -> bool {
        Category::ALL.iter().any(|c| self.get(*c).is_mock())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Refresh {
    pub cycle: u64,
    pub snapshot: Snapshot,
    pub sources: Sources,
    pub status: ApiStatus,
}

impl Refresh {
    /// True when any category, or the status line, came from the fallback.
    pub fn using_mock_data(&self) -> bool {
        self.status.using_mock_data || self.sources.any_mock()
    }
}

pub struct Refresher {
    backend: Arc<dyn Backend>,
    rng: SmallRng,
    last_cycle: u64,
}

impl Refresher {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_rng(backend, SmallRng::from_entropy())
    }

    pub fn with_rng(backend: Arc<dyn Backend>, rng: SmallRng) -> Self {
        Self {
            backend,
            rng,
            last_cycle: 0,
        }
    }

    pub async fn refresh(&mut self) -> Refresh {
        self.last_cycle += 1;
        let cycle = self.last_cycle;

        let backend = &self.backend;
        let (climate, disasters, environmental, status) = tokio::join!(
            backend.climate(ClimateQuery::limited(FETCH_LIMIT)),
            backend.disasters(DisasterQuery::limited(FETCH_LIMIT)),
            backend.environmental(EnvironmentalQuery::limited(FETCH_LIMIT)),
            backend.status(),
        );

        let now = Utc::now();
        let (climate, climate_src) = settle(Category::Temperature, climate, || {
            mock::climate_records(&mut self.rng, now)
        });
        let (disasters, disasters_src) = settle(Category::Disasters, disasters, || {
            mock::disaster_records(&mut self.rng, now)
        });
        let (environmental, environmental_src) =
            settle(Category::Environmental, environmental, || {
                mock::environmental_records(&mut self.rng, now)
            });

        if let Err(err) = &status {
            report(None, err);
        }

        let refresh = Refresh {
            cycle,
            snapshot: Snapshot {
                climate,
                disasters,
                environmental,
            },
            sources: Sources {
                climate: climate_src,
                disasters: disasters_src,
                environmental: environmental_src,
            },
            status: ApiStatus::from_result(status),
        };
        debug!(
            cycle,
            records = refresh.snapshot.total(),
            mock = refresh.using_mock_data(),
            "refresh complete"
        );
        refresh
    }
}

fn settle<T>(
    category: Category,
    result: Result<Vec<T>, ApiError>,
    fallback: impl FnOnce() -> Vec<T>,
) -> (Vec<T>, Provenance) {
    match result {
        Ok(rows) => (rows, Provenance::Live),
        Err(err) => {
            report(Some(category), &err);
            (
                fallback(),
                Provenance::Mock {
                    reason: err.to_string(),
                },
            )
        }
    }
}

fn report(category: Option<Category>, err: &ApiError) {
    let what = category.map_or("status", Category::resource);
    match err {
        ApiError::NotConfigured => warn!(resource = what, "API not configured, using mock data"),
        ApiError::Transport(e) => error!(resource = what, "request failed, using mock data: {e}"),
        ApiError::Status { status, body } => warn!(
            resource = what,
            status,
            body = %body,
            "API error, using mock data"
        ),
    }
}
