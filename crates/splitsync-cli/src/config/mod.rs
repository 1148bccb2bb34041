//! Configuration file management.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use splitsync::FamilyFilter;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Default interval between scheduled syncs, in seconds
pub const DEFAULT_INTERVAL_SECS: u64 = 3600;

/// Default listen address of the trigger endpoint
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8787";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Cloudflare account identifier.
    pub account_id: Option<String>,

    /// Device profile identifier.
    pub profile_id: Option<String>,

    /// API token with Zero Trust edit permission.
    pub api_token: Option<String>,

    /// Address families to sync.
    pub family: Option<FamilyFilter>,

    /// Description for added entries.
    pub description: Option<String>,

    /// Range document URLs, replacing the built-in list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,

    /// API base URL override.
    pub api_base: Option<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Seconds between scheduled syncs in `serve` mode.
    pub interval_secs: Option<u64>,

    /// Listen address of the trigger endpoint in `serve` mode.
    pub listen: Option<String>,
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "splitsync", "splitsync")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path`; a missing file is an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Set a key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "account_id" | "account" => self.account_id = Some(value.to_string()),
            "profile_id" | "profile" => self.profile_id = Some(value.to_string()),
            "api_token" | "token" => self.api_token = Some(value.to_string()),
            "family" => {
                self.family = Some(value.parse().map_err(|e: String| anyhow::anyhow!(e))?);
            }
            "description" => self.description = Some(value.to_string()),
            "sources" => {
                self.sources = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }
            "api_base" => self.api_base = Some(value.to_string()),
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            "interval_secs" | "interval" => self.interval_secs = Some(value.parse()?),
            "listen" => self.listen = Some(value.to_string()),
            _ => {
                anyhow::bail!(
                    "Unknown config key: {key}\n\n\
                     Available keys:\n  \
                     account_id     - Cloudflare account identifier\n  \
                     profile_id     - Device profile identifier\n  \
                     api_token      - API token (Zero Trust: Edit)\n  \
                     family         - ipv4, ipv6 or both\n  \
                     description    - Description for added entries\n  \
                     sources        - Comma-separated range document URLs\n  \
                     api_base       - API base URL\n  \
                     output_format  - Default output format (pretty/json)\n  \
                     interval_secs  - Seconds between scheduled syncs\n  \
                     listen         - Trigger endpoint address"
                );
            }
        }

        Ok(())
    }
}
