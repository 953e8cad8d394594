//! Command-line parsing for the crisis index collector.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline; `app` turns these structs into a `RunConfig`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Where the dashboard expects the snapshot.
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/indicators.json";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "crisis", version, about = "Korean economic crisis index collector")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every indicator, score it, and write the snapshot JSON.
    Collect(CollectArgs),
    /// Print the summary of an existing snapshot.
    Show(ShowArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CollectArgs {
    /// Snapshot output path (parent directories are created).
    #[arg(short, long, default_value = DEFAULT_SNAPSHOT_PATH)]
    pub output: PathBuf,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..=60))]
    pub timeout_secs: u64,

    /// Skip all network calls; every indicator takes its fallback value.
    #[arg(long)]
    pub offline: bool,

    /// Do not print the summary.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    /// Snapshot to read.
    #[arg(short, long, default_value = DEFAULT_SNAPSHOT_PATH)]
    pub input: PathBuf,
}

/// Rewrite argv so a bare `crisis` runs `crisis collect`.
///
/// Rules:
/// - `crisis`                       -> `crisis collect`
/// - `crisis --offline ...`         -> `crisis collect --offline ...`
/// - `crisis --help/--version/-h`   -> unchanged (show top-level help/version)
pub fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("collect".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if matches!(arg1.as_str(), "collect" | "show") {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "collect".to_string());
    }

    argv
}
