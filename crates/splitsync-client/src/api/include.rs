//! Split-tunnel include list endpoints.

use crate::SplitTunnelClient;
use splitsync_core::{Result, RouteEntry};

/// Include list of one device profile
///
/// `GET`/`PUT /accounts/{account}/devices/policy/{profile}/include`. The API
/// has no incremental add; every write replaces the whole list.
pub struct IncludeListApi<'a> {
    client: &'a SplitTunnelClient,
    account_id: &'a str,
    profile_id: &'a str,
}

impl<'a> IncludeListApi<'a> {
    pub(crate) fn new(client: &'a SplitTunnelClient, account_id: &'a str, profile_id: &'a str) -> Self {
        Self {
            client,
            account_id,
            profile_id,
        }
    }

    fn segments(&self) -> [&'a str; 6] {
        [
            "accounts",
            self.account_id,
            "devices",
            "policy",
            self.profile_id,
            "include",
        ]
    }

    /// Current entries, in API order. A missing `result` reads as empty.
    pub async fn routes(&self) -> Result<Vec<RouteEntry>> {
        let envelope = self.client.get::<Vec<RouteEntry>>(&self.segments()).await?;
        Ok(envelope.result.unwrap_or_default())
    }

    /// Overwrite the list with `routes`, returning the API's `success` flag
    pub async fn replace(&self, routes: &[RouteEntry]) -> Result<bool> {
        let envelope = self
            .client
            .put::<serde_json::Value, _>(&self.segments(), routes)
            .await?;
        Ok(envelope.success)
    }
}
