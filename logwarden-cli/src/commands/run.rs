//! `logwarden run` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use logwarden_core::config::LogwardenConfig;
use logwarden_core::types::{Bucket, Distribution};
use logwarden_log_pipeline::{LogPipelineBuilder, PipelineConfig, RunReport};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Maximum bar width of the distribution chart, in characters.
const BAR_WIDTH: usize = 40;

/// Execute the `run` command.
pub fn execute(
    args: RunArgs,
    config: &LogwardenConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut pipeline_config = PipelineConfig::from_core(&config.pipeline);
    if let Some(source) = args.source {
        pipeline_config.source_path = source;
    }
    if let Some(database) = args.database {
        pipeline_config.database_path = database;
    }

    let source = pipeline_config.source_path.display().to_string();
    let database = pipeline_config.database_path.clone();
    info!(source = %source, database = %database, "running pipeline");

    let mut pipeline = LogPipelineBuilder::new()
        .config(pipeline_config)
        .build()?;
    let report = pipeline.run()?;

    writer.render(&RunOutput {
        source,
        database,
        report,
    })?;

    Ok(())
}

/// Result of a single pipeline run.
#[derive(Serialize)]
pub struct RunOutput {
    /// Ingested log file
    pub source: String,
    /// Database the records were written to
    pub database: String,
    #[serde(flatten)]
    pub report: RunReport,
}

impl Render for RunOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let report = &self.report;

        writeln!(w, "Pipeline Run {}", report.run_id.bold())?;
        writeln!(w, "  Source:          {}", self.source)?;
        writeln!(w, "  Database:        {}", self.database)?;
        writeln!(w, "  Lines collected: {}", report.lines_collected)?;
        writeln!(w, "  Records parsed:  {}", report.records_parsed)?;
        writeln!(
            w,
            "  Parse failures:  {}",
            if report.parse_failures > 0 {
                report.parse_failures.to_string().yellow()
            } else {
                report.parse_failures.to_string().normal()
            }
        )?;
        writeln!(w, "  Records stored:  {}", report.records_stored)?;
        writeln!(w, "  Duration:        {}ms", report.duration_ms())?;

        if !report.failed_lines.is_empty() {
            writeln!(w)?;
            writeln!(w, "Unparsed Lines:")?;
            for failure in &report.failed_lines {
                writeln!(w, "  {}: {:?}", failure.to_string().yellow(), failure.line.text)?;
            }
        }

        writeln!(w)?;
        writeln!(w, "Alerts ({})", report.alerts.len().to_string().bold())?;
        if report.alerts.is_empty() {
            writeln!(w, "  (none)")?;
        }
        for alert in &report.alerts {
            writeln!(w, "  {} {}", format!("[{}]", alert.kind).red().bold(), alert.detail)?;
        }

        writeln!(w)?;
        writeln!(w, "Distribution")?;
        for (bucket, count, width) in distribution_bars(&report.distribution, BAR_WIDTH) {
            let bar = "█".repeat(width);
            let bar = match bucket {
                Bucket::Info => bar.green(),
                Bucket::Error => bar.red(),
                Bucket::FailedLogin => bar.yellow(),
            };
            writeln!(w, "  {:<13} {} {}", bucket.label(), bar, count)?;
        }

        Ok(())
    }
}

/// Scale each bucket's count to a bar width of at most `max_width`.
///
/// Non-zero counts always get at least one cell. Order follows [`Bucket::ALL`].
pub fn distribution_bars(
    distribution: &Distribution,
    max_width: usize,
) -> Vec<(Bucket, u64, usize)> {
    let max = distribution.iter().map(|(_, count)| count).max().unwrap_or(0);

    distribution
        .iter()
        .map(|(bucket, count)| {
            let width = if count == 0 || max == 0 {
                0
            } else {
                let scaled = (count as u128 * max_width as u128 / max as u128) as usize;
                scaled.max(1)
            };
            (bucket, count, width)
        })
        .collect()
}
