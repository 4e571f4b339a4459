//! `logwarden config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use logwarden_core::config::LogwardenConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
pub fn execute(
    args: ConfigArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer),
        ConfigAction::Show { section } => execute_show(config_path, section, writer),
    }
}

/// Load and validate the configuration file, reporting any errors.
///
/// A missing file is reported as invalid here, unlike the other commands
/// which fall back to defaults.
fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let report = match LogwardenConfig::load(config_path) {
        Ok(_) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Display the effective configuration (file + defaults).
fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = LogwardenConfig::load_or_default(config_path)?;
    let source = if config_path.exists() {
        config_path.display().to_string()
    } else {
        "(defaults)".to_owned()
    };

    let (section, config_toml) = match section.as_deref() {
        None => (None, to_toml(&config)?),
        Some("general") => (Some("general"), to_toml(&config.general)?),
        Some("pipeline") => (Some("pipeline"), to_toml(&config.pipeline)?),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: general, pipeline)",
                other
            )));
        }
    };

    writer.render(&ConfigReport {
        source,
        section: section.map(str::to_owned),
        config_toml,
        config,
    })?;

    Ok(())
}

fn to_toml<T: Serialize>(value: &T) -> Result<String, CliError> {
    toml::to_string_pretty(value)
        .map_err(|e| CliError::Command(format!("failed to serialize configuration: {}", e)))
}

/// Configuration display report.
///
/// JSON output carries the structured configuration. Text output prints
/// the TOML rendering of the selected section.
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path, or `(defaults)` when no file was found
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Serialized TOML configuration (text rendering only)
    #[serde(skip)]
    pub config_toml: String,
    /// Effective configuration
    pub config: LogwardenConfig,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}
