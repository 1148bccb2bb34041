use thiserror::Error;

/// Result type alias for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that can occur while synchronizing the include list
#[derive(Error, Debug)]
pub enum SyncError {
    /// A required configuration value is missing or unusable
    #[error("configuration error: {0}")]
    Config(String),

    /// Authentication failed - invalid token or insufficient permissions
    #[error("authentication failed: API token rejected")]
    Unauthorized,

    /// Account or device profile not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API, or the raw response body
        message: String,
    },

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A published range document could not be retrieved or parsed
    #[error("source {url} failed: {message}")]
    Source {
        /// The document URL
        url: String,
        /// What went wrong
        message: String,
    },

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl SyncError {
    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns true if the error comes from local configuration
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns the HTTP status code if the remote API answered
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
