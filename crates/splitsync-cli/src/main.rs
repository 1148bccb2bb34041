//! splitsync - WARP split-tunnel include list sync
//!
//! Keeps a device profile's include list in step with Google's published ranges.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    splitsync_cli::run().await
}
