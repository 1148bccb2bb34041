//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::logging;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)?;

    // Determine output format
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    // Flags and environment first, then the config file
    let ctx = commands::Context {
        account_id: cli.account_id.or_else(|| config.account_id.clone()),
        profile_id: cli.profile_id.or_else(|| config.profile_id.clone()),
        api_token: cli.api_token.or_else(|| config.api_token.clone()),
        family: cli.family.or(config.family).unwrap_or_default(),
        description: cli.description.or_else(|| config.description.clone()),
        sources: config.sources.clone(),
        api_base: config.api_base.clone(),
        output_format,
        config_path,
        config,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Run(args) => commands::run::execute(ctx, args).await,
        Commands::Ranges => commands::ranges::execute(ctx).await,
        Commands::Serve(args) => commands::serve::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args),
    }
}
