//! `splitsync ranges` - Print the published ranges after filtering.

use anyhow::Result;
use splitsync::{RangeFetcher, SplitTunnelClient};

use super::Context;
use crate::output::render_ranges;

pub async fn execute(ctx: Context) -> Result<()> {
    let config = ctx.sync_config();

    // Source documents are public; the token is never sent
    let fetcher = RangeFetcher::new(SplitTunnelClient::new(String::new())?);
    let ranges = fetcher.fetch(&config.sources, config.family).await;

    println!("{}", render_ranges(&ranges, ctx.output_format)?);

    Ok(())
}
