//! # splitsync-cli
//!
//! Command-line interface for split-tunnel include list synchronization.
//!
//! ## Features
//!
//! - **One-shot sync**: `splitsync run`, with `--dry-run` to preview
//! - **Range listing**: `splitsync ranges` shows what the sources publish
//! - **Long-running mode**: `splitsync serve` syncs on a timer and on `GET|POST /`
//! - **Config file**: `splitsync config` manages persistent settings

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;
