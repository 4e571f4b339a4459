//! `logwarden query` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use logwarden_core::config::LogwardenConfig;
use logwarden_log_pipeline::{LogPipelineError, LogStore, RecordQuery, StoredRecord};

use crate::cli::QueryArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `query` command.
pub fn execute(
    args: QueryArgs,
    config: &LogwardenConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let database = args
        .database
        .clone()
        .unwrap_or_else(|| config.pipeline.database_path.clone());

    let query = build_query(&args);
    info!(database = %database, ?query, "querying stored records");

    let store = LogStore::open_existing(&database).map_err(LogPipelineError::from)?;
    let records = store.query(&query).map_err(LogPipelineError::from)?;

    writer.render(&QueryReport {
        database,
        total: records.len(),
        records,
    })?;

    Ok(())
}

fn build_query(args: &QueryArgs) -> RecordQuery {
    RecordQuery {
        level: args.level.clone(),
        timestamp_prefix: args.timestamp_prefix.clone(),
        message_contains: args.message.clone(),
        limit: args.limit,
    }
}

/// Stored records matching a query, in id order.
#[derive(Serialize)]
pub struct QueryReport {
    pub database: String,
    pub total: usize,
    pub records: Vec<StoredRecord>,
}

impl Render for QueryReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Stored Records ({} matched, database: {})",
            self.total.to_string().bold(),
            self.database
        )?;
        writeln!(w)?;
        writeln!(w, "{:<6} {:<20} {:<8} Message", "ID", "Timestamp", "Level")?;
        writeln!(w, "{}", "-".repeat(70))?;

        for r in &self.records {
            let level = if r.level.eq_ignore_ascii_case("error") {
                r.level.red()
            } else {
                r.level.normal()
            };
            writeln!(
                w,
                "{:<6} {:<20} {:<8} {}",
                r.id, r.timestamp, level, r.message
            )?;
        }

        Ok(())
    }
}
