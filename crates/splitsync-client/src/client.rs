//! Split-tunnel API client implementation.

use crate::api::IncludeListApi;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use splitsync_core::{ApiEnvelope, Result, SyncError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// The Cloudflare v4 API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Client for the Zero Trust device policy API
#[derive(Clone)]
pub struct SplitTunnelClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    api_token: String,
    base_url: Url,
}

impl std::fmt::Debug for SplitTunnelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitTunnelClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SplitTunnelClient {
    /// Create a new client with the given API token using default settings
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        SplitTunnelClientBuilder::new(api_token).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(api_token: impl Into<String>) -> SplitTunnelClientBuilder {
        SplitTunnelClientBuilder::new(api_token)
    }

    /// Access the split-tunnel include list of one device profile
    #[must_use]
    pub fn include_list<'a>(
        &'a self,
        account_id: &'a str,
        profile_id: &'a str,
    ) -> IncludeListApi<'a> {
        IncludeListApi::new(self, account_id, profile_id)
    }

    /// Fetch and decode a public JSON document. No credentials are sent.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let url = Url::parse(url).map_err(|e| SyncError::InvalidUrl(format!("{url}: {e}")))?;
        debug!(url = %url, "GET document");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SyncError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SyncError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(SyncError::Api {
                code: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(SyncError::Json)
    }

    /// Perform an authenticated GET against the API
    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<ApiEnvelope<T>> {
        let url = self.build_url(segments)?;
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .header(AUTHORIZATION, self.bearer()?)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| SyncError::Http(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Perform an authenticated PUT with a JSON body
    pub(crate) async fn put<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<ApiEnvelope<T>> {
        let url = self.build_url(segments)?;
        debug!(url = %url, "PUT request");

        let response = self
            .inner
            .http
            .put(url)
            .header(AUTHORIZATION, self.bearer()?)
            .json(body)
            .send()
            .await
            .map_err(|e| SyncError::Http(e.to_string()))?;

        self.handle_response(response).await
    }

    fn bearer(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.inner.api_token))
            .map_err(|_| SyncError::Config("API token contains invalid characters".into()))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Append path segments to the base URL, escaping each one
    fn build_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SyncError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Handle an API response that returns a JSON envelope
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<ApiEnvelope<T>> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SyncError::Http(e.to_string()))?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(SyncError::Json)
        } else {
            Err(Self::error_for(status.as_u16(), body))
        }
    }

    /// Convert an error response to a [`SyncError`]
    fn error_for(status: u16, body: String) -> SyncError {
        // Prefer the envelope's first error message over the raw body
        let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
            .ok()
            .and_then(|env| env.first_error().map(String::from))
            .unwrap_or(body);

        match status {
            401 | 403 => {
                warn!(status, message = %message, "API token rejected");
                SyncError::Unauthorized
            }
            404 => SyncError::NotFound { resource: message },
            _ => SyncError::Api {
                code: status,
                message,
            },
        }
    }
}

/// Builder for configuring a [`SplitTunnelClient`]
pub struct SplitTunnelClientBuilder {
    api_token: String,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: String,
}

impl SplitTunnelClientBuilder {
    /// Create a new builder with the given API token
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: format!("splitsync/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a request timeout. Without one, reqwest's default applies.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<SplitTunnelClient> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| SyncError::InvalidUrl(format!("{}: {e}", self.base_url)))?;

        let mut http = HttpClient::builder()
            .user_agent(&self.user_agent)
            .gzip(true);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http
            .build()
            .map_err(|e| SyncError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(SplitTunnelClient {
            inner: Arc::new(ClientInner {
                http,
                api_token: self.api_token,
                base_url,
            }),
        })
    }
}
