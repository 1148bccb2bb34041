//! The sync routine: fetch, reconcile, publish.

use crate::config::SyncConfig;
use crate::fetch::RangeFetcher;
use crate::publish::{publish, AllowListStore};
use crate::reconcile::{reconcile, Reconciliation};
use serde::Serialize;
use splitsync_client::SplitTunnelClient;
use splitsync_core::{Result, RouteEntry};
use tracing::{error, info, instrument};

/// How a sync run ended
///
/// Runs never return an error; every failure is logged and reported here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Required credentials were missing; no network calls were made
    ConfigError {
        /// What is missing
        message: String,
    },

    /// Every fetched range is already on the list; nothing was written
    UpToDate {
        /// Entries on the list
        existing: usize,
    },

    /// The list was replaced
    Updated {
        /// Entries appended
        added: usize,
        /// Entries after the write
        total: usize,
    },

    /// The write was attempted and the API did not accept it
    UpdateRejected {
        /// Entries that would have been appended
        added: usize,
        /// Entries the list would have had
        total: usize,
    },

    /// A dry run computed the entries it would append
    DryRun {
        /// The entries that would be appended
        to_add: Vec<RouteEntry>,
        /// Entries the list would have after a write
        total: usize,
    },

    /// The run stopped on an unexpected error
    Failed {
        /// The error, rendered
        message: String,
    },
}

impl SyncOutcome {
    /// Returns true unless the run hit a configuration error, a rejected
    /// write or an unexpected failure
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(
            self,
            Self::UpToDate { .. } | Self::Updated { .. } | Self::DryRun { .. }
        )
    }

    /// Returns true if the remote list was written
    #[must_use]
    pub const fn wrote(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

impl std::fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigError { message } => write!(f, "configuration error: {message}"),
            Self::UpToDate { existing } => {
                write!(f, "already in sync ({existing} routes)")
            }
            Self::Updated { added, total } => {
                write!(f, "added {added} routes ({total} total)")
            }
            Self::UpdateRejected { added, total } => {
                write!(f, "update of {added} routes ({total} total) was rejected")
            }
            Self::DryRun { to_add, total } => {
                write!(f, "would add {} routes ({total} total)", to_add.len())
            }
            Self::Failed { message } => write!(f, "sync failed: {message}"),
        }
    }
}

/// Runs the reconciliation pass for one configuration
#[derive(Debug, Clone)]
pub struct Synchronizer {
    config: SyncConfig,
}

impl Synchronizer {
    /// Create a synchronizer for `config`
    #[must_use]
    pub const fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    /// The configuration every run uses
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// One full pass against the live API
    pub async fn run(&self) -> SyncOutcome {
        self.execute(false).await
    }

    /// Fetch and reconcile against the live API without writing
    pub async fn plan(&self) -> SyncOutcome {
        self.execute(true).await
    }

    async fn execute(&self, dry_run: bool) -> SyncOutcome {
        if let Some(outcome) = self.check_config() {
            return outcome;
        }

        let client = match self.client() {
            Ok(client) => client,
            Err(e) => {
                error!(error = %e, "An error occurred during sync");
                return SyncOutcome::Failed {
                    message: e.to_string(),
                };
            }
        };

        let fetcher = RangeFetcher::new(client.clone());
        let creds = &self.config.credentials;
        let store = client.include_list(&creds.account_id, &creds.profile_id);

        if dry_run {
            self.plan_with(&fetcher, &store).await
        } else {
            self.run_with(&fetcher, &store).await
        }
    }

    /// Refuse to start without all three credentials
    fn check_config(&self) -> Option<SyncOutcome> {
        let e = self.config.credentials.validate().err()?;
        error!(error = %e, "Missing required configuration, not syncing");
        Some(SyncOutcome::ConfigError {
            message: e.to_string(),
        })
    }

    /// Build the API client for this configuration
    pub fn client(&self) -> Result<SplitTunnelClient> {
        SplitTunnelClient::builder(self.config.credentials.api_token.clone())
            .base_url(self.config.api_base.clone())
            .build()
    }

    /// One full pass against an arbitrary include list
    #[instrument(skip_all, fields(family = %self.config.family))]
    pub async fn run_with<S>(&self, fetcher: &RangeFetcher, store: &S) -> SyncOutcome
    where
        S: AllowListStore + ?Sized,
    {
        if let Some(outcome) = self.check_config() {
            return outcome;
        }

        match self.sync(fetcher, store).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, detail = ?e, "An error occurred during sync");
                SyncOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Dry run against an arbitrary include list; never calls `replace`
    #[instrument(skip_all, fields(family = %self.config.family))]
    pub async fn plan_with<S>(&self, fetcher: &RangeFetcher, store: &S) -> SyncOutcome
    where
        S: AllowListStore + ?Sized,
    {
        if let Some(outcome) = self.check_config() {
            return outcome;
        }

        match self.reconcile(fetcher, store).await {
            Ok(plan) => {
                info!(
                    to_add = plan.added().len(),
                    total = plan.total(),
                    "Dry run, not updating"
                );
                SyncOutcome::DryRun {
                    total: plan.total(),
                    to_add: plan.added().to_vec(),
                }
            }
            Err(e) => {
                error!(error = %e, detail = ?e, "An error occurred during sync");
                SyncOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn reconcile<S>(&self, fetcher: &RangeFetcher, store: &S) -> Result<Reconciliation>
    where
        S: AllowListStore + ?Sized,
    {
        let ranges = fetcher
            .fetch(&self.config.sources, self.config.family)
            .await;
        info!(count = ranges.len(), "Fetched Google IP ranges");

        let existing = store.routes().await?;
        info!(count = existing.len(), "Found existing Split Tunnel routes");

        Ok(reconcile(&ranges, existing, self.config.description()))
    }

    async fn sync<S>(&self, fetcher: &RangeFetcher, store: &S) -> Result<SyncOutcome>
    where
        S: AllowListStore + ?Sized,
    {
        let plan = self.reconcile(fetcher, store).await?;

        if plan.is_noop() {
            info!("Split Tunnel list is already in sync. No updates needed.");
            return Ok(SyncOutcome::UpToDate {
                existing: plan.existing().len(),
            });
        }

        let added = plan.added().len();
        let total = plan.total();
        info!(added, total, "Adding new routes");

        let list = plan.into_complete_list();
        if publish(store, &list).await? {
            info!(total, "Successfully updated the Split Tunnel Include List.");
            Ok(SyncOutcome::Updated { added, total })
        } else {
            error!(added, total, "Failed to update the Split Tunnel Include List.");
            Ok(SyncOutcome::UpdateRejected { added, total })
        }
    }
}
