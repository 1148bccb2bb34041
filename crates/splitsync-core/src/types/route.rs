use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a split-tunnel include list
///
/// Entries are keyed by `address`. Host-based entries (`host` instead of
/// `address`) and any fields not modelled here are carried through a full
/// replace untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// CIDR range routed outside the tunnel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Domain routed outside the tunnel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Free-form label, never compared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Remaining fields, written back as read
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RouteEntry {
    /// Create an address entry
    #[must_use]
    pub fn new(address: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            host: None,
            description: Some(description.into()),
            extra: Map::new(),
        }
    }

    /// Returns the CIDR key of this entry, if it is address-based
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Returns the label, if the entry has one
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(json: &str) -> String {
        let entry: RouteEntry = serde_json::from_str(json).unwrap();
        serde_json::to_string(&entry).unwrap()
    }

    #[test]
    fn host_entries_round_trip_without_address() {
        let entry: RouteEntry =
            serde_json::from_str(r#"{"host":"example.com","description":"corp"}"#).unwrap();
        assert_eq!(entry.address(), None);
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"host":"example.com","description":"corp"}"#
        );
    }

    #[test]
    fn missing_description_stays_missing() {
        assert_eq!(round_trip(r#"{"address":"10.0.0.0/8"}"#), r#"{"address":"10.0.0.0/8"}"#);
    }

    #[test]
    fn null_description_is_accepted() {
        let entries: Vec<RouteEntry> =
            serde_json::from_str(r#"[{"address":"10.0.0.0/8","description":null}]"#).unwrap();
        assert_eq!(entries[0].address(), Some("10.0.0.0/8"));
        assert_eq!(entries[0].description(), None);
    }

    #[test]
    fn unknown_fields_survive() {
        let entry: RouteEntry = serde_json::from_str(
            r#"{"address":"10.0.0.0/8","description":"lab","created_at":"2024-01-01","tags":["x"]}"#,
        )
        .unwrap();
        assert_eq!(entry.extra["tags"], serde_json::json!(["x"]));

        let back: Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            back,
            serde_json::json!({
                "address": "10.0.0.0/8",
                "description": "lab",
                "created_at": "2024-01-01",
                "tags": ["x"]
            })
        );
    }
}
