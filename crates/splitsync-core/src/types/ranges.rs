use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Which address families a sync run picks up from the published documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyFilter {
    /// `ipv4Prefix` entries only
    Ipv4,
    /// `ipv6Prefix` entries only
    Ipv6,
    /// Both families
    #[default]
    Both,
}

impl FamilyFilter {
    /// Returns true if IPv4 prefixes are wanted
    #[must_use]
    pub const fn includes_ipv4(self) -> bool {
        matches!(self, Self::Ipv4 | Self::Both)
    }

    /// Returns true if IPv6 prefixes are wanted
    #[must_use]
    pub const fn includes_ipv6(self) -> bool {
        matches!(self, Self::Ipv6 | Self::Both)
    }

    /// Description attached to entries added under this filter
    #[must_use]
    pub const fn default_description(self) -> &'static str {
        match self {
            Self::Ipv4 => "Google IPv4 Range (Auto-synced)",
            Self::Ipv6 => "Google IPv6 Range (Auto-synced)",
            Self::Both => "Google Service Range (Auto-synced)",
        }
    }
}

impl FromStr for FamilyFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ipv4" | "v4" | "4" => Ok(Self::Ipv4),
            "ipv6" | "v6" | "6" => Ok(Self::Ipv6),
            "both" | "all" | "dual" => Ok(Self::Both),
            other => Err(format!(
                "unknown address family filter: {other} (expected ipv4, ipv6 or both)"
            )),
        }
    }
}

impl std::fmt::Display for FamilyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ipv4 => write!(f, "ipv4"),
            Self::Ipv6 => write!(f, "ipv6"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// Address family of a single CIDR string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpFamily {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

impl IpFamily {
    /// Classify a CIDR string. Anything containing a colon is IPv6.
    #[must_use]
    pub fn of(cidr: &str) -> Self {
        if cidr.contains(':') {
            Self::V6
        } else {
            Self::V4
        }
    }
}

/// A published IP range document (`goog.json`, `cloud.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Publisher's version token
    #[serde(default, rename = "syncToken")]
    pub sync_token: Option<String>,

    /// When the document was generated
    #[serde(default, rename = "creationTime")]
    pub creation_time: Option<String>,

    /// IPv4 section; entries may also appear without a prefix
    #[serde(default, deserialize_with = "null_as_empty")]
    pub prefixes: Vec<Ipv4PrefixEntry>,

    /// IPv6 section
    #[serde(default, rename = "ipv6Prefixes", deserialize_with = "null_as_empty")]
    pub ipv6_prefixes: Vec<Ipv6PrefixEntry>,
}

/// An element of [`SourceDocument::prefixes`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ipv4PrefixEntry {
    /// The CIDR range
    #[serde(default, rename = "ipv4Prefix")]
    pub ipv4_prefix: Option<String>,

    /// Publishing service, kept as published
    #[serde(default)]
    pub service: Option<Value>,

    /// Region or `global`, kept as published
    #[serde(default)]
    pub scope: Option<Value>,
}

/// An element of [`SourceDocument::ipv6_prefixes`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ipv6PrefixEntry {
    /// The CIDR range
    #[serde(default, rename = "ipv6Prefix")]
    pub ipv6_prefix: Option<String>,

    /// Publishing service, kept as published
    #[serde(default)]
    pub service: Option<Value>,

    /// Region or `global`, kept as published
    #[serde(default)]
    pub scope: Option<Value>,
}

/// A section that is `null` reads as empty
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SourceDocument {
    /// Pull the CIDR strings selected by `filter`.
    ///
    /// Only `prefixes[].ipv4Prefix` counts as IPv4 and only
    /// `ipv6Prefixes[].ipv6Prefix` counts as IPv6; entries without the
    /// field, or with an empty one, are skipped. The result may contain
    /// duplicates.
    #[must_use]
    pub fn extract(&self, filter: FamilyFilter) -> Vec<String> {
        let mut out = Vec::new();

        if filter.includes_ipv4() {
            out.extend(
                self.prefixes
                    .iter()
                    .filter_map(|p| p.ipv4_prefix.clone())
                    .filter(|p| !p.is_empty()),
            );
        }

        if filter.includes_ipv6() {
            out.extend(
                self.ipv6_prefixes
                    .iter()
                    .filter_map(|p| p.ipv6_prefix.clone())
                    .filter(|p| !p.is_empty()),
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "syncToken": "1700000000000",
        "creationTime": "2024-01-01T00:00:00.000000",
        "prefixes": [
            {"ipv4Prefix": "34.2.0.0/16", "service": "Google Cloud", "scope": "us-east1"},
            {"ipv4Prefix": "8.8.4.0/24"},
            {"service": "Google Cloud"}
        ],
        "ipv6Prefixes": [
            {"ipv6Prefix": "2600:1900::/35", "service": "Google Cloud", "scope": "global"},
            {"scope": "global"}
        ]
    }"#;

    fn doc() -> SourceDocument {
        serde_json::from_str(DOC).unwrap()
    }

    #[test]
    fn ipv4_filter_yields_no_ipv6() {
        let ranges = doc().extract(FamilyFilter::Ipv4);
        assert_eq!(ranges, vec!["34.2.0.0/16", "8.8.4.0/24"]);
        assert!(ranges.iter().all(|r| IpFamily::of(r) == IpFamily::V4));
    }

    #[test]
    fn ipv6_filter_yields_no_ipv4() {
        assert_eq!(doc().extract(FamilyFilter::Ipv6), vec!["2600:1900::/35"]);
    }

    #[test]
    fn both_reads_both_sections() {
        assert_eq!(doc().extract(FamilyFilter::Both).len(), 3);
    }

    #[test]
    fn empty_document_contributes_nothing() {
        let empty: SourceDocument = serde_json::from_str("{}").unwrap();
        assert!(empty.extract(FamilyFilter::Both).is_empty());
    }

    #[test]
    fn v6_prefix_filed_under_prefixes_is_ignored() {
        let doc: SourceDocument =
            serde_json::from_str(r#"{"prefixes":[{"ipv6Prefix":"2001:db8::/32"}]}"#).unwrap();
        assert!(doc.extract(FamilyFilter::Both).is_empty());
    }

    #[test]
    fn empty_prefix_strings_are_skipped() {
        let doc: SourceDocument = serde_json::from_str(
            r#"{"prefixes":[{"ipv4Prefix":""},{"ipv4Prefix":"8.8.4.0/24"}],
                "ipv6Prefixes":[{"ipv6Prefix":""}]}"#,
        )
        .unwrap();
        assert_eq!(doc.extract(FamilyFilter::Both), vec!["8.8.4.0/24"]);
    }

    #[test]
    fn null_section_keeps_the_other() {
        let doc: SourceDocument = serde_json::from_str(
            r#"{"prefixes":null,"ipv6Prefixes":[{"ipv6Prefix":"2001:4860::/32"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.extract(FamilyFilter::Both), vec!["2001:4860::/32"]);
    }

    #[test]
    fn metadata_of_any_shape_is_accepted() {
        let doc: SourceDocument = serde_json::from_str(
            r#"{"prefixes":[{"ipv4Prefix":"34.2.0.0/16","service":null,"scope":["us-east1","us-west1"]}]}"#,
        )
        .unwrap();
        assert_eq!(doc.extract(FamilyFilter::Ipv4), vec!["34.2.0.0/16"]);
    }

    #[test]
    fn filter_parsing() {
        assert_eq!("IPv4".parse::<FamilyFilter>(), Ok(FamilyFilter::Ipv4));
        assert_eq!("v6".parse::<FamilyFilter>(), Ok(FamilyFilter::Ipv6));
        assert_eq!("both".parse::<FamilyFilter>(), Ok(FamilyFilter::Both));
        assert!("ipx".parse::<FamilyFilter>().is_err());
        assert_eq!(FamilyFilter::Ipv6.to_string(), "ipv6");
    }

    #[test]
    fn default_descriptions_differ_per_family() {
        assert_eq!(
            FamilyFilter::Both.default_description(),
            "Google Service Range (Auto-synced)"
        );
        assert_ne!(
            FamilyFilter::Ipv4.default_description(),
            FamilyFilter::Ipv6.default_description()
        );
    }
}
