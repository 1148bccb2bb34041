//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use splitsync::FamilyFilter;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Keep a WARP split-tunnel include list in step with Google's IP ranges
///
/// Every run appends the published ranges missing from the device
/// profile's include list. Existing entries are never removed or changed.
#[derive(Parser, Debug)]
#[command(name = "splitsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Cloudflare account identifier
    #[arg(long, env = "ACCOUNT_ID", global = true)]
    pub account_id: Option<String>,

    /// Device profile identifier
    #[arg(long, env = "PROFILE_ID", global = true)]
    pub profile_id: Option<String>,

    /// API token with Zero Trust edit permission
    #[arg(long, env = "CLOUDFLARE_API_TOKEN", global = true, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Address families to sync
    #[arg(long, env = "SPLITSYNC_FAMILY", global = true, value_parser = parse_family)]
    pub family: Option<FamilyFilter>,

    /// Description for added entries
    #[arg(long, env = "SPLITSYNC_DESCRIPTION", global = true)]
    pub description: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "SPLITSYNC_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

fn parse_family(s: &str) -> Result<FamilyFilter, String> {
    s.parse()
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one sync pass now
    Run(RunArgs),

    /// Fetch and print the published ranges
    Ranges,

    /// Sync on a timer and on HTTP request until interrupted
    Serve(ServeArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Run command
// ============================================================================

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Show what would be added without writing
    #[arg(long)]
    pub dry_run: bool,
}

// ============================================================================
// Serve command
// ============================================================================

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address of the manual trigger endpoint
    #[arg(long, env = "SPLITSYNC_LISTEN")]
    pub listen: Option<String>,

    /// Seconds between scheduled syncs
    #[arg(long, env = "SPLITSYNC_INTERVAL_SECS")]
    pub interval_secs: Option<u64>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., account_id, family)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_flags() {
        let cli = Cli::try_parse_from([
            "splitsync",
            "--account-id",
            "acc",
            "--family",
            "ipv4",
            "run",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.account_id.as_deref(), Some("acc"));
        assert_eq!(cli.family, Some(FamilyFilter::Ipv4));
        assert!(matches!(cli.command, Commands::Run(RunArgs { dry_run: true })));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["splitsync", "serve", "--interval-secs", "60", "-o", "json"])
            .unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.interval_secs, Some(60)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_family() {
        assert!(Cli::try_parse_from(["splitsync", "--family", "ipx", "ranges"]).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
