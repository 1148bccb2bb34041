//! Command implementations.

pub mod config;
pub mod ranges;
pub mod run;
pub mod serve;

use splitsync::{Credentials, FamilyFilter, SyncConfig};
use std::path::PathBuf;

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Cloudflare account identifier
    pub account_id: Option<String>,

    /// Device profile identifier
    pub profile_id: Option<String>,

    /// API token
    pub api_token: Option<String>,

    /// Address families to sync
    pub family: FamilyFilter,

    /// Description override for added entries
    pub description: Option<String>,

    /// Source URL override; empty means the built-in list
    pub sources: Vec<String>,

    /// API base URL override
    pub api_base: Option<String>,

    /// Output format
    pub output_format: OutputFormat,

    /// Where the config file lives
    pub config_path: PathBuf,

    /// The loaded config file
    pub config: Config,
}

impl Context {
    /// Build the sync configuration.
    ///
    /// Missing credentials are left blank; the sync run reports them.
    pub fn sync_config(&self) -> SyncConfig {
        let credentials = Credentials::new(
            self.account_id.clone().unwrap_or_default(),
            self.profile_id.clone().unwrap_or_default(),
            self.api_token.clone().unwrap_or_default(),
        );

        let mut config = SyncConfig::new(credentials).with_family(self.family);

        if !self.sources.is_empty() {
            config = config.with_sources(self.sources.clone());
        }
        if let Some(description) = &self.description {
            config = config.with_description(description.clone());
        }
        if let Some(base) = &self.api_base {
            config = config.with_api_base(base.clone());
        }

        config
    }
}
