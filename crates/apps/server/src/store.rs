//! In-memory tables with an optional JSON snapshot on disk.
//!
//! Reads and writes go through a `parking_lot::RwLock`; snapshot writes are
//! serialized by an async mutex and land via a temp file + rename.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use records::{ClimateRecord, DisasterRecord, EnvironmentalRecord, Record, SyncSummary};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("snapshot {path} is not valid: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default)]
    pub climate_data: Vec<ClimateRecord>,
    #[serde(default)]
    pub disaster_events: Vec<DisasterRecord>,
    #[serde(default)]
    pub environmental_data: Vec<EnvironmentalRecord>,
}

/// A record kind with its own table.
pub trait Table: Record + Clone + Send + Sync + 'static {
    const NAME: &'static str;

    fn rows(tables: &Tables) -> &Vec<Self>;
    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self>;
}

impl Table for ClimateRecord {
    const NAME: &'static str = "climate_data";

    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.climate_data
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.climate_data
    }
}

impl Table for DisasterRecord {
    const NAME: &'static str = "disaster_events";

    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.disaster_events
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.disaster_events
    }
}

impl Table for EnvironmentalRecord {
    const NAME: &'static str = "environmental_data";

    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.environmental_data
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.environmental_data
    }
}

pub struct Store {
    tables: RwLock<Tables>,
    path: Option<PathBuf>,
    write_lock: Mutex<()>,
}

impl Store {
    pub fn in_memory() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            path: None,
            write_lock: Mutex::new(()),
        }
    }

    /// Opens a store backed by `path`, loading the snapshot if one exists.
    pub async fn open(path: PathBuf) -> Result<Self, StoreError> {
        let tables = load(&path).await?;
        info!(
            path = %path.display(),
            climate = tables.climate_data.len(),
            disasters = tables.disaster_events.len(),
            environmental = tables.environmental_data.len(),
            "loaded table snapshot"
        );
        Ok(Self {
            tables: RwLock::new(tables),
            path: Some(path),
            write_lock: Mutex::new(()),
        })
    }

    /// Rows at or after `since` that pass `keep`, newest first, at most
    /// `limit` of them.
    pub fn select<T: Table>(
        &self,
        since: DateTime<Utc>,
        limit: usize,
        keep: impl Fn(&T) -> bool,
    ) -> Vec<T> {
        let tables = self.tables.read();
        let mut rows: Vec<T> = T::rows(&tables)
            .iter()
            .filter(|r| r.timestamp() >= since && keep(r))
            .cloned()
            .collect();
        drop(tables);
        rows.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        rows.truncate(limit);
        rows
    }

    #[cfg(test)]
    pub fn count<T: Table>(&self) -> usize {
        T::rows(&self.tables.read()).len()
    }

    pub fn summary(&self) -> SyncSummary {
        let tables = self.tables.read();
        SyncSummary {
            climate_records: tables.climate_data.len(),
            disaster_records: tables.disaster_events.len(),
            environmental_records: tables.environmental_data.len(),
        }
    }

    pub async fn insert<T: Table>(&self, rows: Vec<T>) -> Result<Vec<T>, StoreError> {
        T::rows_mut(&mut self.tables.write()).extend(rows.iter().cloned());
        debug!(table = T::NAME, count = rows.len(), "inserted rows");
        self.persist().await?;
        Ok(rows)
    }

    /// Applies `update` to the first `n` rows in storage order and returns
    /// how many rows it touched.
    pub async fn update_first<T: Table>(
        &self,
        n: usize,
        mut update: impl FnMut(&mut T),
    ) -> Result<usize, StoreError> {
        let touched = {
            let mut tables = self.tables.write();
            let rows = T::rows_mut(&mut tables);
            let touched = rows.len().min(n);
            rows.iter_mut().take(touched).for_each(&mut update);
            touched
        };
        debug!(table = T::NAME, count = touched, "updated rows");
        self.persist().await?;
        Ok(touched)
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let _g = self.write_lock.lock().await;
        let text = {
            let tables = self.tables.read();
            serde_json::to_string_pretty(&*tables)?
        };
        save(path, &text).await
    }
}

async fn load(path: &Path) -> Result<Tables, StoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(s) => serde_json::from_str(&s).map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Tables::default()),
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

async fn save(path: &Path, text: &str) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, text).await.map_err(write_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use records::NewClimateRecord;

    use super::*;

    pub fn climate_at(location: &str, temperature: f64, ts: DateTime<Utc>) -> ClimateRecord {
        NewClimateRecord {
            location: location.to_string(),
            lat: 0.0,
            lng: 0.0,
            temperature,
            humidity: 50.0,
            wind_speed: 3.0,
        }
        .into_record(format!("{location}-{}", ts.timestamp()), ts)
    }

    #[tokio::test]
    async fn select_orders_newest_first_and_limits() {
        let store = Store::in_memory();
        let base = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        let rows = (0..5)
            .map(|h| climate_at("Lagos", 20.0, base + TimeDelta::hours(h)))
            .collect();
        store.insert(rows).await.unwrap();

        let got: Vec<ClimateRecord> = store.select(base + TimeDelta::hours(1), 3, |_| true);
        let hours: Vec<i64> = got.iter().map(|r| (r.timestamp - base).num_hours()).collect();
        assert_eq!(hours, vec![4, 3, 2]);
        assert_eq!(store.count::<ClimateRecord>(), 5);
        assert_eq!(store.summary().climate_records, 5);
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tables.json");
        let store = Store::open(path.clone()).await.unwrap();
        store
            .insert(vec![climate_at("Tokyo", 18.5, Utc::now())])
            .await
            .unwrap();
        store
            .update_first::<ClimateRecord>(5, |r| r.temperature = 21.0)
            .await
            .unwrap();

        let reopened = Store::open(path).await.unwrap();
        let rows: Vec<ClimateRecord> = reopened.select(DateTime::<Utc>::MIN_UTC, 10, |_| true);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].temperature, 21.0);
    }

    #[tokio::test]
    async fn unwritable_snapshot_is_an_error() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let path = blocker.path().join("tables.json");
        let store = Store {
            tables: RwLock::new(Tables::default()),
            path: Some(path),
            write_lock: Mutex::new(()),
        };
        let err = store
            .insert(vec![climate_at("Cairo", 30.0, Utc::now())])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Store::open(path).await,
            Err(StoreError::Decode { .. })
        ));
    }
}
