//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{DomainError, TemplateId};
use crate::error::ErrorCategory;

/// Which pipeline stage a generation failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Resolve,
    Parse,
    Validate,
    Render,
    Verify,
}

impl GenerationStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Resolve => "resolve",
            Self::Parse => "parse",
            Self::Validate => "validate",
            Self::Render => "render",
            Self::Verify => "verify",
        }
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A generation request failed. Identifies the offending file and the
    /// stage it failed in; the underlying cause propagates unchanged.
    #[error("generating '{template}' failed at the {stage} stage: {source}")]
    Generation {
        template: TemplateId,
        stage: GenerationStage,
        #[source]
        source: DomainError,
    },

    /// Filesystem operation failed while the host wrote the tree.
    #[error("filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Target directory already exists.
    #[error("project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Best-effort cleanup after a failed write also failed.
    #[error("rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Generation {
                template, source, ..
            } => {
                let mut suggestions = vec![format!("While generating '{template}':")];
                suggestions.extend(source.suggestions());
                suggestions
            }
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different project name".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![
                format!("Partially written output remains at {}", path.display()),
                "Remove it manually before retrying".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Generation { source, .. } => match source.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Template => ErrorCategory::Template,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } => ErrorCategory::Internal,
        }
    }
}
