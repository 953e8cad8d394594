//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - installs the tracing subscriber
//! - runs the collect pipeline against live (or offline) providers
//! - writes the snapshot and prints the summary

use std::time::Duration;

use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{CollectArgs, Command, ShowArgs, rewrite_args};
use crate::data::{HttpStatSource, OfflineSource, StatSource};
use crate::domain::{Catalog, ProviderConfig, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable holding the log filter (`info`, `debug`, `kr_crisis_index=trace`, ...).
pub const LOG_ENV: &str = "CRISIS_LOG";

/// Entry point for the `crisis` binary.
pub fn run() -> Result<(), AppError> {
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_tracing();

    match cli.command {
        Command::Collect(args) => handle_collect(args),
        Command::Show(args) => handle_show(args),
    }
}

/// Log to stderr so stdout carries only the summary.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_collect(args: CollectArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let catalog = Catalog::standard();

    let source: Box<dyn StatSource> = if config.offline {
        info!("offline run: every indicator will use its fallback value");
        Box::new(OfflineSource)
    } else {
        Box::new(HttpStatSource::new(&config.providers, config.timeout)?)
    };

    let now = Local::now().naive_local();
    let snapshot = pipeline::run_collect(source.as_ref(), &catalog, now)?;

    crate::io::write_snapshot_json(&config.output, &snapshot)?;

    if !config.quiet {
        println!("{}", crate::report::format_snapshot_summary(&snapshot));
        println!("저장 완료: {}", config.output.display());
    }

    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let snapshot = crate::io::read_snapshot_json(&args.input)?;
    println!("{}", crate::report::format_snapshot_summary(&snapshot));
    Ok(())
}

pub fn run_config_from_args(args: &CollectArgs) -> RunConfig {
    RunConfig {
        output: args.output.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
        offline: args.offline,
        quiet: args.quiet,
        providers: ProviderConfig::from_env(),
    }
}
