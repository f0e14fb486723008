//! Error handling for the Keel CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;
use tracing::error;

use keel_core::error::{ErrorCategory, KeelError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed before the core was reached).
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A manifest file passed to `upgrade` could not be read.
    #[error("Cannot read manifest {path}")]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// An error propagated from `keel-core`.
    ///
    /// Wrapped here so the CLI can attach suggestions drawn from the core
    /// error's category without touching core internals.
    #[error("{0}")]
    Core(#[from] KeelError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],
            Self::ManifestUnreadable { path, .. } => vec![
                format!("Could not read: {}", path.display()),
                "Check the path and file permissions".into(),
                "Pass --current/--latest paths to existing Cargo.toml files".into(),
            ],
            Self::ConfigError { message } => vec![
                format!("Configuration issue: {message}"),
                format!(
                    "The default config location is {}",
                    crate::config::AppConfig::config_path().display()
                ),
            ],
            Self::Core(core_err) => core_err.suggestions(),
            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions and available disk space".into(),
            ],
            Self::Cancelled => vec!["No changes were made".into()],
        }
    }

    /// Map to an OS exit code.
    ///
    /// | Code | Meaning                 |
    /// |------|-------------------------|
    /// |  1   | Internal / system error |
    /// |  2   | User / input error      |
    /// |  3   | Resource not found      |
    /// |  4   | Configuration error     |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput { .. } | Self::Cancelled => 2,
            Self::ManifestUnreadable { .. } => 3,
            Self::ConfigError { .. } => 4,
            Self::Core(core) => match core.category() {
                ErrorCategory::Validation => 2,
                ErrorCategory::NotFound => 3,
                ErrorCategory::Template | ErrorCategory::Internal => 1,
            },
            Self::IoError { .. } => 1,
        }
    }

    /// Emit a structured log event at the right severity.
    pub fn log(&self) {
        error!(error = %self, exit_code = self.exit_code(), "command failed");
    }

    /// Render a colored, multi-line user-facing message.
    pub fn format_colored(&self) -> String {
        let mut out = format!("{} {}\n", "\u{2717}".red().bold(), self.to_string().red());
        for suggestion in self.suggestions() {
            out.push_str(&format!("  {} {suggestion}\n", "\u{2192}".dimmed()));
        }
        out
    }

    /// Render a plain-text user-facing message (non-TTY stderr).
    pub fn format_plain(&self) -> String {
        let mut out = format!("error: {self}\n");
        for suggestion in self.suggestions() {
            out.push_str(&format!("  -> {suggestion}\n"));
        }
        out
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
