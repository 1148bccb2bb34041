//! Output formatting for different formats.

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use splitsync::SyncOutcome;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable, colored
    #[default]
    Pretty,
    /// JSON output
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Render a sync outcome.
pub fn render_outcome(outcome: &SyncOutcome, format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(outcome)?);
    }

    let line = match outcome {
        SyncOutcome::Updated { .. } | SyncOutcome::UpToDate { .. } => {
            format!("{} {}", "Success:".green().bold(), outcome)
        }
        SyncOutcome::DryRun { to_add, .. } => {
            let mut out = format!("{} {}", "Dry run:".cyan().bold(), outcome);
            for entry in to_add {
                if let Some(address) = entry.address() {
                    out.push_str(&format!("\n  + {address}"));
                }
            }
            out
        }
        SyncOutcome::UpdateRejected { .. }
        | SyncOutcome::ConfigError { .. }
        | SyncOutcome::Failed { .. } => format!("{} {}", "Error:".red().bold(), outcome),
    };

    Ok(line)
}

/// Render a set of ranges.
pub fn render_ranges(ranges: &BTreeSet<String>, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(ranges)?),
        OutputFormat::Pretty => {
            let mut out = String::new();
            for range in ranges {
                out.push_str(range);
                out.push('\n');
            }
            out.push_str(&format!("{} {} ranges", "Total:".bold(), ranges.len()));
            Ok(out)
        }
    }
}
