//! `splitsync serve` - Timer plus manual trigger endpoint.

use anyhow::{Context as _, Result};
use splitsync::{router, schedule, SyncTrigger, Synchronizer};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use super::Context;
use crate::cli::args::ServeArgs;
use crate::config::{DEFAULT_INTERVAL_SECS, DEFAULT_LISTEN};

pub async fn execute(ctx: Context, args: ServeArgs) -> Result<()> {
    let listen = args
        .listen
        .or_else(|| ctx.config.listen.clone())
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
    let interval_secs = args
        .interval_secs
        .or(ctx.config.interval_secs)
        .unwrap_or(DEFAULT_INTERVAL_SECS);
    anyhow::ensure!(interval_secs > 0, "interval_secs must be greater than zero");

    let sync_config = ctx.sync_config();
    if let Err(e) = sync_config.credentials.validate() {
        // Keep serving; every run will report the same error
        warn!(error = %e, "Starting without complete credentials");
    }

    let listener = TcpListener::bind(&listen)
        .await
        .with_context(|| format!("Failed to bind {listen}"))?;
    info!(address = %listen, interval_secs, "Listening for manual sync triggers");

    let trigger = SyncTrigger::new(Synchronizer::new(sync_config));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let timer = tokio::spawn(schedule(
        trigger.clone(),
        Duration::from_secs(interval_secs),
        shutdown_rx,
    ));

    axum::serve(listener, router(trigger))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("Trigger endpoint failed")?;

    let _ = shutdown_tx.send(true);
    timer.await?;

    Ok(())
}
