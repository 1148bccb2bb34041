//! HTTP client for the Cloudflare Zero Trust split-tunnel API.
//!
//! This crate provides the [`SplitTunnelClient`] used to read and replace a
//! device profile's include list, plus an unauthenticated JSON fetch for
//! the public range documents.

#![doc(html_root_url = "https://docs.rs/splitsync-client/0.1.0")]

mod client;
pub mod api;

pub use client::{SplitTunnelClient, SplitTunnelClientBuilder, DEFAULT_BASE_URL};
pub use splitsync_core::{Result, SyncError};
