//! Sync configuration, passed explicitly into every run.

use splitsync_client::DEFAULT_BASE_URL;
use splitsync_core::{FamilyFilter, Result, SyncError};

/// Google's published range documents
pub const DEFAULT_SOURCES: [&str; 2] = [
    "https://www.gstatic.com/ipranges/cloud.json",
    "https://www.gstatic.com/ipranges/goog.json",
];

/// Environment variable holding the Cloudflare account identifier
pub const ENV_ACCOUNT_ID: &str = "ACCOUNT_ID";
/// Environment variable holding the device profile identifier
pub const ENV_PROFILE_ID: &str = "PROFILE_ID";
/// Environment variable holding the API token (Zero Trust: Edit)
pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
/// Optional environment variable selecting the family filter
pub const ENV_FAMILY: &str = "SPLITSYNC_FAMILY";
/// Optional environment variable overriding the entry description
pub const ENV_DESCRIPTION: &str = "SPLITSYNC_DESCRIPTION";

/// The three values required to touch the include list
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Cloudflare account identifier
    pub account_id: String,
    /// Device profile identifier
    pub profile_id: String,
    /// Bearer token
    pub api_token: String,
}

impl Credentials {
    /// Create credentials from the three identifiers
    #[must_use]
    pub fn new(
        account_id: impl Into<String>,
        profile_id: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            profile_id: profile_id.into(),
            api_token: api_token.into(),
        }
    }

    /// Fail on the first blank value
    pub fn validate(&self) -> Result<()> {
        let fields = [
            (ENV_ACCOUNT_ID, &self.account_id),
            (ENV_PROFILE_ID, &self.profile_id),
            (ENV_API_TOKEN, &self.api_token),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(SyncError::Config(format!("{name} is not set")));
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("profile_id", &self.profile_id)
            .field("api_token", &mask(&self.api_token))
            .finish()
    }
}

/// Mask a secret for display, keeping the first and last four characters
#[must_use]
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.is_empty() {
        String::new()
    } else if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}

/// Everything one sync run needs
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Account, profile and token
    pub credentials: Credentials,

    /// Range document URLs, fetched concurrently
    pub sources: Vec<String>,

    /// Which prefixes to pick up
    pub family: FamilyFilter,

    /// Description for added entries; `None` uses the family default
    pub description: Option<String>,

    /// API base URL
    pub api_base: String,
}

impl SyncConfig {
    /// Create a configuration with default sources, filter and API base
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            sources: DEFAULT_SOURCES.iter().map(ToString::to_string).collect(),
            family: FamilyFilter::default(),
            description: None,
            api_base: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read the configuration from the process environment.
    ///
    /// Missing credentials become empty strings so the run can report them
    /// through [`Credentials::validate`]. An unparseable family is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`SyncConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::new(
            lookup(ENV_ACCOUNT_ID).unwrap_or_default(),
            lookup(ENV_PROFILE_ID).unwrap_or_default(),
            lookup(ENV_API_TOKEN).unwrap_or_default(),
        );

        let mut config = Self::new(credentials);

        if let Some(family) = lookup(ENV_FAMILY).filter(|v| !v.trim().is_empty()) {
            config.family = family.trim().parse().map_err(SyncError::Config)?;
        }

        config.description = lookup(ENV_DESCRIPTION).filter(|v| !v.trim().is_empty());

        Ok(config)
    }

    /// Set the family filter
    #[must_use]
    pub fn with_family(mut self, family: FamilyFilter) -> Self {
        self.family = family;
        self
    }

    /// Replace the source URLs
    #[must_use]
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Override the description of added entries
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Point the API client elsewhere (useful for testing)
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// The description attached to new entries
    #[must_use]
    pub fn description(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or_else(|| self.family.default_description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn validate_names_first_missing_value() {
        let err = Credentials::new("acc", "  ", "").validate().unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("PROFILE_ID"));

        assert!(Credentials::new("acc", "prof", "tok").validate().is_ok());
    }

    #[test]
    fn from_lookup_reads_credentials_and_defaults() {
        let config = SyncConfig::from_lookup(lookup(&[
            ("ACCOUNT_ID", "acc"),
            ("PROFILE_ID", "prof"),
            ("CLOUDFLARE_API_TOKEN", "tok"),
        ]))
        .unwrap();

        assert_eq!(config.credentials, Credentials::new("acc", "prof", "tok"));
        assert_eq!(config.family, FamilyFilter::Both);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.api_base, DEFAULT_BASE_URL);
        assert_eq!(config.description(), "Google Service Range (Auto-synced)");
    }

    #[test]
    fn from_lookup_tolerates_missing_credentials() {
        let config = SyncConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.credentials.validate().is_err());
    }

    #[test]
    fn from_lookup_reads_family_and_description() {
        let config = SyncConfig::from_lookup(lookup(&[
            ("SPLITSYNC_FAMILY", "ipv4"),
            ("SPLITSYNC_DESCRIPTION", "Google (synced)"),
        ]))
        .unwrap();
        assert_eq!(config.family, FamilyFilter::Ipv4);
        assert_eq!(config.description(), "Google (synced)");

        assert!(SyncConfig::from_lookup(lookup(&[("SPLITSYNC_FAMILY", "ipx")])).is_err());
    }

    #[test]
    fn description_follows_family_when_unset() {
        let config = SyncConfig::new(Credentials::default()).with_family(FamilyFilter::Ipv4);
        assert_eq!(config.description(), "Google IPv4 Range (Auto-synced)");
    }

    #[test]
    fn debug_masks_token() {
        let creds = Credentials::new("acc", "prof", "abcdefghijklmnop");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("abcd...mnop"));
        assert!(!rendered.contains("abcdefghijklmnop"));
        assert_eq!(mask("short"), "****");
        assert_eq!(mask(""), "");
    }
}
