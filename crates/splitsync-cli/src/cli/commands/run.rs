//! `splitsync run` - One sync pass.

use anyhow::Result;
use splitsync::Synchronizer;

use super::Context;
use crate::cli::args::RunArgs;
use crate::output::render_outcome;

pub async fn execute(ctx: Context, args: RunArgs) -> Result<()> {
    let synchronizer = Synchronizer::new(ctx.sync_config());

    let outcome = if args.dry_run {
        synchronizer.plan().await
    } else {
        synchronizer.run().await
    };

    // The outcome is reported, never turned into a failing exit status
    println!("{}", render_outcome(&outcome, ctx.output_format)?);

    Ok(())
}
