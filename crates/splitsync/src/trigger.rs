//! Trigger runtime: a timer and an HTTP endpoint that start sync runs.
//!
//! Runs are started, not awaited. Two triggers close together produce two
//! independent runs racing on the remote list; the last write wins.

use crate::sync::{SyncOutcome, Synchronizer};
use axum::{extract::State, http::StatusCode, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Body of the manual trigger acknowledgment
pub const ACK_BODY: &str = "Cloudflare WARP Split-Tunnel sync initiated.";

/// Starts sync runs in the background
#[derive(Clone)]
pub struct SyncTrigger {
    synchronizer: Arc<Synchronizer>,
    on_complete: Option<mpsc::UnboundedSender<SyncOutcome>>,
}

impl SyncTrigger {
    /// Create a trigger around `synchronizer`
    #[must_use]
    pub fn new(synchronizer: Synchronizer) -> Self {
        Self {
            synchronizer: Arc::new(synchronizer),
            on_complete: None,
        }
    }

    /// Deliver every finished run's outcome to `tx`
    #[must_use]
    pub fn with_completion_hook(mut self, tx: mpsc::UnboundedSender<SyncOutcome>) -> Self {
        self.on_complete = Some(tx);
        self
    }

    /// Spawn one sync run and return without waiting for it
    pub fn fire(&self) -> JoinHandle<SyncOutcome> {
        let synchronizer = Arc::clone(&self.synchronizer);
        let on_complete = self.on_complete.clone();

        tokio::spawn(async move {
            let outcome = synchronizer.run().await;
            info!(outcome = %outcome, "Sync run finished");
            if let Some(tx) = on_complete {
                // A dropped receiver only means nobody is listening
                let _ = tx.send(outcome.clone());
            }
            outcome
        })
    }
}

/// HTTP routes: `GET|POST /` start a run, `GET /health` answers `ok`
pub fn router(trigger: SyncTrigger) -> Router {
    Router::new()
        .route("/", get(manual_sync).post(manual_sync))
        .route("/health", get(health))
        .with_state(trigger)
}

async fn manual_sync(State(trigger): State<SyncTrigger>) -> (StatusCode, &'static str) {
    debug!("Manual sync requested");
    // The handle is dropped on purpose; the run continues detached
    drop(trigger.fire());
    (StatusCode::OK, ACK_BODY)
}

async fn health() -> &'static str {
    "ok"
}

/// Fire `trigger` every `period` until `shutdown` flips to `true`.
///
/// The first run starts immediately. Ticks missed while the runtime was
/// busy are skipped, not replayed.
pub async fn schedule(trigger: SyncTrigger, period: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!(period_secs = period.as_secs(), "Sync schedule started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                debug!("Scheduled sync");
                drop(trigger.fire());
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("Sync schedule stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, SyncConfig};

    fn unconfigured() -> SyncTrigger {
        SyncTrigger::new(Synchronizer::new(SyncConfig::new(Credentials::default())))
    }

    #[tokio::test]
    async fn fire_reports_through_hook() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let trigger = unconfigured().with_completion_hook(tx);

        let outcome = trigger.fire().await.unwrap();
        assert!(matches!(outcome, SyncOutcome::ConfigError { .. }));
        assert_eq!(rx.recv().await, Some(outcome));
    }

    #[tokio::test]
    async fn schedule_fires_until_shutdown() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let trigger = unconfigured().with_completion_hook(tx);
        let (stop_tx, stop_rx) = watch::channel(false);

        let task = tokio::spawn(schedule(trigger, Duration::from_millis(20), stop_rx));

        for _ in 0..2 {
            let outcome = rx.recv().await.unwrap();
            assert!(matches!(outcome, SyncOutcome::ConfigError { .. }));
        }

        stop_tx.send(true).unwrap();
        task.await.unwrap();
    }
}
