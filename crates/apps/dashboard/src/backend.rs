//! The dashboard's view of the API.
//!
//! Queries are passed by value so the returned futures only borrow the
//! backend. Methods return boxed futures for dyn-compatibility.

use std::future::Future;
use std::pin::Pin;

use records::{
    ClimateRecord, DisasterRecord, EnvironmentalRecord, NewClimateRecord, NewDisasterRecord,
    NewEnvironmentalRecord, SyncStatus,
};

use crate::api::ApiError;

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type Params = Vec<(&'static str, String)>;

fn push<T: ToString>(params: &mut Params, key: &'static str, value: &Option<T>) {
    if let Some(v) = value {
        params.push((key, v.to_string()));
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClimateQuery {
    pub location: Option<String>,
    pub limit: Option<usize>,
    pub hours: Option<i64>,
}

impl ClimateQuery {
    pub fn limited(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn params(&self) -> Params {
        let mut p = Params::new();
        push(&mut p, "location", &self.location);
        push(&mut p, "limit", &self.limit);
        push(&mut p, "hours", &self.hours);
        p
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisasterQuery {
    pub severity: Option<String>,
    pub kind: Option<String>,
    pub limit: Option<usize>,
    pub hours: Option<i64>,
}

impl DisasterQuery {
    pub fn limited(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn params(&self) -> Params {
        let mut p = Params::new();
        push(&mut p, "severity", &self.severity);
        push(&mut p, "type", &self.kind);
        push(&mut p, "limit", &self.limit);
        push(&mut p, "hours", &self.hours);
        p
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentalQuery {
    pub location: Option<String>,
    pub limit: Option<usize>,
    pub hours: Option<i64>,
    pub min_aqi: Option<f64>,
    pub max_aqi: Option<f64>,
}

impl EnvironmentalQuery {
    pub fn limited(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn params(&self) -> Params {
        let mut p = Params::new();
        push(&mut p, "location", &self.location);
        push(&mut p, "limit", &self.limit);
        push(&mut p, "hours", &self.hours);
        push(&mut p, "min_aqi", &self.min_aqi);
        push(&mut p, "max_aqi", &self.max_aqi);
        p
    }
}

/// Implementations must be `Send + Sync` so one backend can serve the
/// refresh loop and one-shot commands alike.
pub trait Backend: Send + Sync {
    fn climate(&self, query: ClimateQuery) -> BoxFuture<'_, Result<Vec<ClimateRecord>, ApiError>>;

    fn disasters(
        &self,
        query: DisasterQuery,
    ) -> BoxFuture<'_, Result<Vec<DisasterRecord>, ApiError>>;

    fn environmental(
        &self,
        query: EnvironmentalQuery,
    ) -> BoxFuture<'_, Result<Vec<EnvironmentalRecord>, ApiError>>;

    fn status(&self) -> BoxFuture<'_, Result<SyncStatus, ApiError>>;

    /// Asks the API to insert a batch of demo rows.
    fn seed(&self) -> BoxFuture<'_, Result<(), ApiError>>;

    fn add_climate(
        &self,
        record: NewClimateRecord,
    ) -> BoxFuture<'_, Result<ClimateRecord, ApiError>>;

    fn report_disaster(
        &self,
        record: NewDisasterRecord,
    ) -> BoxFuture<'_, Result<DisasterRecord, ApiError>>;

    fn add_environmental(
        &self,
        record: NewEnvironmentalRecord,
    ) -> BoxFuture<'_, Result<EnvironmentalRecord, ApiError>>;
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use chrono::Utc;
    use records::{Snapshot, SyncSummary};

    use super::*;

    /// Scripted backend. Returns `snapshot` before a seed and `seeded`
    /// afterwards; categories listed in `failing` answer with a 502.
    #[derive(Default)]
    pub struct FakeBackend {
        pub snapshot: Snapshot,
        pub seeded: Snapshot,
        pub failing: Vec<records::Category>,
        pub status_fails: bool,
        pub seed_calls: AtomicUsize,
        pub fetches: AtomicUsize,
        pub seen_limits: Mutex<Vec<Option<usize>>>,
    }

    impl FakeBackend {
        fn current(&self) -> &Snapshot {
            if self.seed_calls.load(Ordering::SeqCst) > 0 {
                &self.seeded
            } else {
                &self.snapshot
            }
        }

        fn answer<T: Clone + Send + 'static>(
            &self,
            category: records::Category,
            rows: &[T],
        ) -> BoxFuture<'_, Result<Vec<T>, ApiError>> {
            let result = if self.failing.contains(&category) {
                Err(ApiError::Status {
                    status: 502,
                    body: "upstream down".to_string(),
                })
            } else {
                Ok(rows.to_vec())
            };
            Box::pin(async move { result })
        }
    }

    impl Backend for FakeBackend {
        fn climate(
            &self,
            query: ClimateQuery,
        ) -> BoxFuture<'_, Result<Vec<ClimateRecord>, ApiError>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.seen_limits.lock().unwrap().push(query.limit);
            self.answer(records::Category::Temperature, &self.current().climate)
        }

        fn disasters(
            &self,
            _query: DisasterQuery,
        ) -> BoxFuture<'_, Result<Vec<DisasterRecord>, ApiError>> {
            self.answer(records::Category::Disasters, &self.current().disasters)
        }

        fn environmental(
            &self,
            _query: EnvironmentalQuery,
        ) -> BoxFuture<'_, Result<Vec<EnvironmentalRecord>, ApiError>> {
            self.answer(
                records::Category::Environmental,
                &self.current().environmental,
            )
        }

        fn status(&self) -> BoxFuture<'_, Result<SyncStatus, ApiError>> {
            let result = if self.status_fails {
                Err(ApiError::Status {
                    status: 500,
                    body: "{\"error\":\"boom\"}".to_string(),
                })
            } else {
                let snap = self.current();
                Ok(SyncStatus {
                    summary: SyncSummary {
                        climate_records: snap.climate.len(),
                        disaster_records: snap.disasters.len(),
                        environmental_records: snap.environmental.len(),
                    },
                    status: "API is running".to_string(),
                })
            };
            Box::pin(async move { result })
        }

        fn seed(&self) -> BoxFuture<'_, Result<(), ApiError>> {
            self.seed_calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async { Ok(()) })
        }

        fn add_climate(
            &self,
            record: NewClimateRecord,
        ) -> BoxFuture<'_, Result<ClimateRecord, ApiError>> {
            Box::pin(async move { Ok(record.into_record("fake-1", Utc::now())) })
        }

        fn report_disaster(
            &self,
            record: NewDisasterRecord,
        ) -> BoxFuture<'_, Result<DisasterRecord, ApiError>> {
            Box::pin(async move { Ok(record.into_record("fake-1", Utc::now())) })
        }

        fn add_environmental(
            &self,
            record: NewEnvironmentalRecord,
        ) -> BoxFuture<'_, Result<EnvironmentalRecord, ApiError>> {
            Box::pin(async move { Ok(record.into_record("fake-1", Utc::now())) })
        }
    }
}
