//! `splitsync config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;
use splitsync::config::mask;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::{Config, DEFAULT_INTERVAL_SECS, DEFAULT_LISTEN};
use crate::output::OutputFormat;

pub fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(ctx, &key, &value),
        ConfigCommands::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    config.api_token = config.api_token.as_deref().map(mask);

    if ctx.output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Current Configuration:".bold());
    println!();

    print_entry("account_id", config.account_id.as_deref());
    print_entry("profile_id", config.profile_id.as_deref());
    print_entry("api_token", config.api_token.as_deref());
    print_entry(
        "family",
        Some(&config.family.unwrap_or_default().to_string()),
    );
    print_entry("description", config.description.as_deref());

    if config.sources.is_empty() {
        print_entry("sources", Some("(built-in)"));
    } else {
        println!("  {}", "sources:".bold());
        for source in &config.sources {
            println!("    {source}");
        }
    }

    print_entry("api_base", config.api_base.as_deref());
    print_entry(
        "output_format",
        Some(&config.output_format.unwrap_or(OutputFormat::Pretty).to_string()),
    );
    print_entry(
        "interval_secs",
        Some(&config.interval_secs.unwrap_or(DEFAULT_INTERVAL_SECS).to_string()),
    );
    print_entry("listen", Some(config.listen.as_deref().unwrap_or(DEFAULT_LISTEN)));

    Ok(())
}

fn print_entry(key: &str, value: Option<&str>) {
    let value = value.map_or_else(|| "(not set)".dimmed().to_string(), String::from);
    println!("  {} {}", format!("{key}:").bold(), value);
}

fn set_config(ctx: Context, key: &str, value: &str) -> Result<()> {
    let mut config: Config = ctx.config;
    config.set(key, value)?;
    config.save_to(&ctx.config_path)?;

    println!("{} Set {}", "✓".green(), key.bold());
    Ok(())
}
