//! Core types and errors for split-tunnel include list synchronization.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - **Types**: the include list [`RouteEntry`], the published range
//!   [`SourceDocument`], the [`FamilyFilter`] and the API response envelope
//! - **Errors**: the [`SyncError`] taxonomy
//!
//! # Example
//!
//! ```rust
//! use splitsync_core::{FamilyFilter, SourceDocument};
//!
//! let doc: SourceDocument = serde_json::from_str(
//!     r#"{"prefixes":[{"ipv4Prefix":"8.8.4.0/24"}],"ipv6Prefixes":[{"ipv6Prefix":"2001:4860::/32"}]}"#,
//! ).unwrap();
//!
//! assert_eq!(doc.extract(FamilyFilter::Ipv4), vec!["8.8.4.0/24".to_string()]);
//! ```

#![doc(html_root_url = "https://docs.rs/splitsync-core/0.1.0")]

mod error;
pub mod types;

pub use error::{Result, SyncError};
pub use types::*;
