//! List publisher and the include list seam.

use async_trait::async_trait;
use splitsync_client::api::IncludeListApi;
use splitsync_core::{Result, RouteEntry, SyncError};
use tracing::error;

/// Remote include list, read whole and replaced whole
#[async_trait]
pub trait AllowListStore: Send + Sync {
    /// Current entries, in remote order
    async fn routes(&self) -> Result<Vec<RouteEntry>>;

    /// Overwrite the list. `Ok(false)` means the API declined the write.
    async fn replace(&self, routes: &[RouteEntry]) -> Result<bool>;
}

#[async_trait]
impl<'a> AllowListStore for IncludeListApi<'a> {
    async fn routes(&self) -> Result<Vec<RouteEntry>> {
        IncludeListApi::routes(self).await
    }

    async fn replace(&self, routes: &[RouteEntry]) -> Result<bool> {
        IncludeListApi::replace(self, routes).await
    }
}

/// Write `list` in one full replace.
///
/// An error status from the API is logged and reported as `Ok(false)`.
/// Transport failures are returned to the caller. Never retries.
pub async fn publish<S>(store: &S, list: &[RouteEntry]) -> Result<bool>
where
    S: AllowListStore + ?Sized,
{
    match store.replace(list).await {
        Ok(success) => Ok(success),
        Err(SyncError::Api { code, message }) => {
            error!(status = code, response = %message, "Update failed");
            Ok(false)
        }
        Err(e @ (SyncError::Unauthorized | SyncError::NotFound { .. })) => {
            error!(status = ?e.status_code(), error = %e, "Update failed");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
