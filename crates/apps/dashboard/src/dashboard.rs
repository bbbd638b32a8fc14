//! Refresh loop: periodic cycles, the one-time seed and the state the view
//! renders from.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::backend::Backend;
use crate::refresh::{Refresh, Refresher};

/// Latest applied refresh. Results from an older cycle never replace a
/// newer one.
#[derive(Debug, Default)]
pub struct DashboardState {
    current: Option<Refresh>,
}

impl DashboardState {
    /// Returns false when `refresh` is older than what is already held.
    pub fn apply(&mut self, refresh: Refresh) -> bool {
        if let Some(held) = &self.current {
            if refresh.cycle < held.cycle {
                return false;
            }
        }
        self.current = Some(refresh);
        true
    }

    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Refresh> {
        self.current.as_ref()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    pub interval: Duration,
    /// Pause between a successful seed and the forced reload.
    pub reload_delay: Duration,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            reload_delay: Duration::from_secs(2),
        }
    }
}

pub struct Dashboard {
    refresher: Refresher,
    backend: Arc<dyn Backend>,
    state: DashboardState,
    seeded: bool,
    options: DashboardOptions,
}

impl Dashboard {
    pub fn new(backend: Arc<dyn Backend>, options: DashboardOptions) -> Self {
        Self::with_refresher(Refresher::new(backend.clone()), backend, options)
    }

    pub fn with_refresher(
        refresher: Refresher,
        backend: Arc<dyn Backend>,
        options: DashboardOptions,
    ) -> Self {
        Self {
            refresher,
            backend,
            state: DashboardState::default(),
            seeded: false,
            options,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// One refresh cycle. The first time the API answers with no rows at all
    /// it is asked to seed itself, followed by a single forced reload.
    pub async fn cycle(&mut self) -> bool {
        let refresh = self.refresher.refresh().await;
        let needs_seed = !self.seeded && refresh.snapshot.is_empty();
        let mut applied = self.state.apply(refresh);

        if needs_seed {
            self.seeded = true;
            info!("API returned no data, seeding");
            match self.backend.seed().await {
                Ok(()) => {
                    tokio::time::sleep(self.options.reload_delay).await;
                    self.state.reset();
                    let reload = self.refresher.refresh().await;
                    applied = self.state.apply(reload);
                }
                Err(err) => warn!("seeding failed: {err}"),
            }
        }
        applied
    }

    /// Cycles every `interval` until `shutdown` resolves. A shutdown during a
    /// cycle drops its in-flight requests.
    pub async fn run<S, F>(&mut self, shutdown: S, mut publish: F)
    where
        S: Future<Output = ()>,
        F: FnMut(&Refresh),
    {
        tokio::pin!(shutdown);
        let mut ticker = tokio::time::interval(self.options.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }
            let applied = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("shutdown requested, cancelling refresh");
                    break;
                }
                applied = self.cycle() => applied,
            };
            if applied {
                if let Some(refresh) = self.state.current() {
                    publish(refresh);
                }
            }
        }
        info!("refresh loop stopped");
    }
}
