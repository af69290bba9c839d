//! hashscan - batch hash lookups against a threat-intelligence API
//!
//! Loads configuration, runs the batch analyzer over the requested hashes and
//! renders the verdicts.

mod cli;
mod display;
mod error;
mod events;
mod input;
mod logging;
mod scan;

use crate::cli::{AnalyzerOverrides, Cli, Commands, GlobalArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use crate::scan::ScanOptions;
use clap::Parser;
use hashscan_analyzer::{AnalyzerSettings, HashAnalyzer};
use hashscan_config::Config;
use hashscan_net::VirusTotalClient;
use hashscan_types::OutputFormat;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Application error: {}", e);
            if !json_mode {
                eprintln!("Error: {e}");
            }
            process::exit(1);
        }
    }
}

/// Main application logic, returns the process exit code
async fn run(cli: Cli) -> Result<i32, CliError> {
    info!("Starting hashscan v{}", env!("CARGO_PKG_VERSION"));

    // defaults < file < environment < flags
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env()?;

    let Commands::Check(args) = cli.command;
    apply_cli_config(&mut config, &cli.global, &args.overrides);
    config.validate()?;

    let hashes = input::collect_hashes(&args.hashes, args.from_file.as_deref()).await?;

    let (event_sender, mut event_receiver) = hashscan_events::channel();
    let client = VirusTotalClient::from_config(&config)?;
    let analyzer = HashAnalyzer::new(Arc::new(client), AnalyzerSettings::from_config(&config))
        .with_events(event_sender);

    let format = if cli.global.json {
        OutputFormat::Json
    } else {
        config.general.default_output
    };
    let renderer = OutputRenderer::new(format, config.general.color);
    let handler = EventHandler::new(
        renderer.supports_color(),
        cli.global.debug,
        format == OutputFormat::Json,
    );

    let options = ScanOptions {
        retry_rounds: args.retry_rounds,
        refresh_interval: config.analyzer.refresh_interval(),
    };
    let report = scan::run_scan(
        &analyzer,
        &hashes,
        options,
        &renderer,
        &mut event_receiver,
        &handler,
    )
    .await?;

    renderer.render_report(&report)?;

    info!(
        threats = report.tally.threats,
        errors = report.tally.errors,
        interrupted = report.interrupted,
        "Check completed"
    );
    Ok(report.exit_code())
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &GlobalArgs, overrides: &AnalyzerOverrides) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
    if let Some(output) = global.output {
        config.general.default_output = output;
    }
    if let Some(concurrency) = overrides.concurrency {
        config.analyzer.concurrency_limit = concurrency;
    }
    if let Some(cycle_ms) = overrides.min_cycle_ms {
        config.analyzer.min_cycle_duration_ms = cycle_ms;
    }
    if let Some(key) = &overrides.api_key {
        // a key on the command line is always the raw key
        config.api.api_key.clone_from(key);
        config.api.api_key_encoding = hashscan_config::ApiKeyEncoding::Plain;
    }
    if let Some(url) = &overrides.base_url {
        config.api.base_url.clone_from(url);
    }
    if overrides.test_mode {
        config.testing.enabled = true;
    }
    if let Some(sentinel) = &overrides.sentinel {
        config.testing.sentinel_hash.clone_from(sentinel);
    }
}

fn log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("hashscan").join("logs"))
}

fn debug_filter(default: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
}

/// Open a fresh timestamped log file under the data directory
fn create_log_file() -> std::io::Result<(PathBuf, std::fs::File)> {
    let dir = log_dir()
        .ok_or_else(|| std::io::Error::other("no data directory for this platform"))?;
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(format!(
        "hashscan-{}.log",
        chrono::Utc::now().format("%Y%m%d-%H%M%S")
    ));
    let file = std::fs::File::create(&path)?;
    Ok((path, file))
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    const DEBUG_FILTER: &str = "info,hashscan=debug,hashscan_analyzer=debug";
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if json_mode {
        // JSON mode: keep stdout clean, log to file only when debugging
        if debug_enabled {
            if let Ok((_, file)) = create_log_file() {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(debug_filter(DEBUG_FILTER))
                    .init();
                return;
            }
        }
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else if debug_enabled {
        match create_log_file() {
            Ok((path, file)) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(debug_filter(DEBUG_FILTER))
                    .init();

                eprintln!("Debug logging enabled: {}", path.display());
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log file: {e}");
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(debug_filter("info,hashscan=info"))
                    .init();
            }
        }
    } else {
        // Normal mode: warnings only, on stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(debug_filter("warn,hashscan=warn"))
            .init();
    }
}
