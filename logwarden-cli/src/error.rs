//! CLI-specific error types and exit code mapping

use logwarden_core::error::LogwardenError;
use logwarden_log_pipeline::LogPipelineError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Pipeline domain error (build, storage, run).
    #[error("pipeline error: {0}")]
    Pipeline(#[from] LogPipelineError),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from logwarden-core.
    #[error("{0}")]
    Core(#[from] LogwardenError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                               |
    /// |------|---------------------------------------|
    /// | 0    | Success                               |
    /// | 1    | General / command error               |
    /// | 2    | Configuration error                   |
    /// | 5    | Storage unavailable or write failed   |
    /// | 10   | IO error                              |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Core(LogwardenError::Config(_)) => 2,
            Self::Core(LogwardenError::Storage(_)) => 5,
            Self::Pipeline(LogPipelineError::Config { .. }) => 2,
            Self::Pipeline(LogPipelineError::Storage(_))
            | Self::Pipeline(LogPipelineError::StageFailed { .. }) => 5,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}
