//! Keep a Cloudflare WARP split-tunnel include list in step with Google's
//! published IP ranges.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use splitsync::{SyncConfig, Synchronizer};
//!
//! #[tokio::main]
//! async fn main() -> splitsync::Result<()> {
//!     let config = SyncConfig::from_env()?;
//!     let outcome = Synchronizer::new(config).run().await;
//!     println!("{outcome}");
//!     Ok(())
//! }
//! ```
//!
//! A run fetches the range documents concurrently, reads the current include
//! list, appends every missing prefix and writes the whole list back. When
//! nothing is missing no write happens, so repeated runs are idempotent.
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/splitsync/0.1.0")]

pub mod config;
pub mod fetch;
pub mod publish;
pub mod reconcile;
pub mod sync;
pub mod trigger;

// Re-export core types
pub use splitsync_core::*;

// Re-export client
pub use splitsync_client::{api::IncludeListApi, SplitTunnelClient, SplitTunnelClientBuilder};

pub use config::{Credentials, SyncConfig, DEFAULT_SOURCES};
pub use fetch::RangeFetcher;
pub use publish::{publish, AllowListStore};
pub use reconcile::{reconcile, Reconciliation};
pub use sync::{SyncOutcome, Synchronizer};
pub use trigger::{router, schedule, SyncTrigger};

// Re-export runtime for convenience
pub use tokio;
