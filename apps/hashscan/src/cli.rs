//! Command line interface definition

use clap::{Args, Parser, Subcommand};
use hashscan_types::{ColorChoice, OutputFormat};
use std::path::PathBuf;

/// hashscan - batch hash lookups against a threat-intelligence API
#[derive(Parser)]
#[command(name = "hashscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Batch hash lookups against a threat-intelligence API")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (--json wins over this)
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Write debug logs to the hashscan data directory
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Look hashes up and report threats
    #[command(alias = "c")]
    Check(CheckArgs),
}

/// Arguments of `hashscan check`
#[derive(Args)]
pub struct CheckArgs {
    /// MD5, SHA-1 or SHA-256 hex digests
    pub hashes: Vec<String>,

    /// Read hashes from a file, one per line (`#` starts a comment)
    #[arg(long, short = 'f', value_name = "PATH")]
    pub from_file: Option<PathBuf>,

    /// Re-run failed lookups this many times
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub retry_rounds: u32,

    #[command(flatten)]
    pub overrides: AnalyzerOverrides,
}

/// Per-invocation overrides of the analyzer configuration
#[derive(Args, Default)]
pub struct AnalyzerOverrides {
    /// Maximum concurrent lookups
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Minimum time between two provider calls of one lane
    #[arg(long, value_name = "MS")]
    pub min_cycle_ms: Option<u64>,

    /// Provider API key
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Provider base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Answer the sentinel hash locally as a threat
    #[arg(long)]
    pub test_mode: bool,

    /// Sentinel hash used in test mode
    #[arg(long, value_name = "HASH")]
    pub sentinel: Option<String>,
}
