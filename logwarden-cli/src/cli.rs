//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Logwarden -- batch log ingestion, storage and security alerting.
///
/// Use `logwarden <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "logwarden", version, about, long_about = None)]
pub struct Cli {
    /// Path to the logwarden.toml configuration file.
    ///
    /// Built-in defaults are used when the file does not exist.
    #[arg(short, long, global = true, default_value = "logwarden.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pipeline once: collect, parse, store, evaluate, report.
    Run(RunArgs),

    /// Query records persisted by the last run.
    Query(QueryArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- run ----

/// Run the pipeline over a log file.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Log file to ingest (overrides `pipeline.source_path`).
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// SQLite database path (overrides `pipeline.database_path`).
    #[arg(short, long)]
    pub database: Option<String>,
}

// ---- query ----

/// Read stored records, filtered by level, message and timestamp prefix.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Match level exactly (ASCII case-insensitive).
    #[arg(short, long)]
    pub level: Option<String>,

    /// Match records whose message contains this text (case-insensitive).
    #[arg(short, long)]
    pub message: Option<String>,

    /// Match records whose timestamp starts with this literal prefix (e.g. `2023-10-01`).
    #[arg(long)]
    pub timestamp_prefix: Option<String>,

    /// Maximum number of rows to return.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// SQLite database path (overrides `pipeline.database_path`).
    #[arg(short, long)]
    pub database: Option<String>,
}

// ---- config ----

/// Manage logwarden configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + defaults).
    Show {
        /// Show only a specific section (general, pipeline).
        #[arg(long)]
        section: Option<String>,
    },
}
