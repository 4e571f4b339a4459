//! `logwarden` binary entry point.
//!
//! Parses arguments, loads `logwarden.toml` (falling back to defaults when it
//! is missing), initializes logging and dispatches to a command handler.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use logwarden_core::config::{GeneralConfig, LogwardenConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        use colored::Colorize;
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    // `config` reports load errors itself, everything else needs a usable config.
    let loaded = LogwardenConfig::load_or_default(&cli.config);

    let mut general = match &loaded {
        Ok(config) => config.general.clone(),
        Err(_) => GeneralConfig::default(),
    };
    if let Some(level) = cli.log_level {
        general.log_level = level;
    }
    logging::init_tracing(&general)
        .map_err(|e| CliError::Config(format!("logging: {}", e)))?;

    logwarden_core::metrics::describe_all();
    tracing::debug!(config = %cli.config.display(), "logwarden starting");

    match cli.command {
        Commands::Run(args) => commands::run::execute(args, &loaded?, &writer),
        Commands::Query(args) => commands::query::execute(args, &loaded?, &writer),
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer),
    }
}
