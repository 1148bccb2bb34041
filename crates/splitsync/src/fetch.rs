//! Range fetcher: published documents in, deduplicated CIDR set out.

use futures_util::future::join_all;
use splitsync_client::SplitTunnelClient;
use splitsync_core::{FamilyFilter, Result, SourceDocument, SyncError};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Fetches the published range documents
#[derive(Debug, Clone)]
pub struct RangeFetcher {
    client: SplitTunnelClient,
}

impl RangeFetcher {
    /// Create a fetcher that shares `client`'s connection pool
    #[must_use]
    pub const fn new(client: SplitTunnelClient) -> Self {
        Self { client }
    }

    /// Fetch every source concurrently and merge the filtered prefixes.
    ///
    /// A source that fails (transport error, HTTP error status, body that is
    /// not a range document) is logged and contributes nothing.
    pub async fn fetch(&self, sources: &[String], filter: FamilyFilter) -> BTreeSet<String> {
        let results = join_all(sources.iter().map(|url| self.fetch_one(url, filter))).await;

        let mut ranges = BTreeSet::new();
        for (url, result) in sources.iter().zip(results) {
            match result {
                Ok(found) => {
                    debug!(url = %url, count = found.len(), "source fetched");
                    ranges.extend(found);
                }
                Err(e) => warn!(url = %url, error = %e, "Error fetching IP ranges"),
            }
        }

        ranges
    }

    /// Fetch a single source document and extract its prefixes
    pub async fn fetch_one(&self, url: &str, filter: FamilyFilter) -> Result<Vec<String>> {
        let document: SourceDocument =
            self.client
                .get_json(url)
                .await
                .map_err(|e| SyncError::Source {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        Ok(document.extract(filter))
    }
}
