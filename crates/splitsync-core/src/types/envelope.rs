use serde::{Deserialize, Serialize};

/// Standard response wrapper of the Cloudflare v4 API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Payload, absent on most failures
    pub result: Option<T>,

    /// Whether the API considers the call successful
    #[serde(default)]
    pub success: bool,

    /// Error messages
    #[serde(default)]
    pub errors: Vec<ApiMessage>,

    /// Informational messages
    #[serde(default)]
    pub messages: Vec<ApiMessage>,
}

impl<T> ApiEnvelope<T> {
    /// First error message, if any
    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}

/// A message inside an [`ApiEnvelope`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Numeric API code
    #[serde(default)]
    pub code: i64,

    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RouteEntry;

    #[test]
    fn parses_error_envelope() {
        let body = r#"{"result":null,"success":false,"errors":[{"code":10000,"message":"Authentication error"}],"messages":[]}"#;
        let env: ApiEnvelope<Vec<RouteEntry>> = serde_json::from_str(body).unwrap();
        assert!(!env.success);
        assert!(env.result.is_none());
        assert_eq!(env.first_error(), Some("Authentication error"));
    }

    #[test]
    fn tolerates_missing_fields() {
        let env: ApiEnvelope<Vec<RouteEntry>> = serde_json::from_str("{}").unwrap();
        assert!(!env.success);
        assert!(env.errors.is_empty());
    }
}
