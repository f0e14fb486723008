//! Domain error types.
//!
//! All errors are:
//! - Cloneable (for retry logic at the host)
//! - Categorizable (for CLI display)
//! - Actionable (provides suggestions)

use thiserror::Error;

use crate::domain::template::TemplateId;
use crate::domain::value_objects::{Architecture, DatabaseProvider};

/// Root domain error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Option validation
    // ========================================================================
    #[error("invalid project options: {0}")]
    InvalidOptions(String),

    // ========================================================================
    // Template resolution and parsing
    // ========================================================================
    /// No variant is registered for this identifier under the active
    /// architecture/database selectors. Fatal for the whole generation
    /// request: a missing mandatory template means an incomplete tree.
    #[error(
        "no template variant for '{id}' (architecture: {architecture}, database: {database})"
    )]
    TemplateNotFound {
        id: TemplateId,
        architecture: Architecture,
        database: DatabaseProvider,
    },

    /// Malformed directive in a built-in template. Indicates a packaging
    /// defect, not a user input error.
    #[error("template syntax error at line {line}, column {column}: {message}")]
    TemplateSyntax {
        line: usize,
        column: usize,
        message: String,
    },

    // ========================================================================
    // Rendering
    // ========================================================================
    /// A directive references a name absent from the options schema.
    #[error("unresolved placeholder '{name}' in {directive} directive")]
    UnresolvedPlaceholder {
        name: String,
        directive: &'static str,
    },

    /// Rendered output still contains template marker syntax. Defends
    /// against renderer logic gaps; caught by the post-render check.
    #[error("rendered output for '{path}' still contains marker '{marker}'")]
    UnrenderedMarker { path: String, marker: String },

    // ========================================================================
    // Generated tree invariants
    // ========================================================================
    #[error("duplicate output path in generated tree: {path}")]
    DuplicatePath { path: String },

    #[error("absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("generation produced no files")]
    EmptyOutput,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidOptions(msg) => vec![
                "Check your project options".into(),
                format!("Details: {}", msg),
            ],
            Self::TemplateNotFound { id, architecture, database } => vec![
                format!(
                    "No built-in template covers '{id}' for {architecture}/{database}"
                ),
                "Try a different --arch / --database combination".into(),
                "If this combination should work, please report it as a bug".into(),
            ],
            Self::TemplateSyntax { .. } | Self::UnrenderedMarker { .. } => vec![
                "A shipped template is malformed".into(),
                "This is a packaging defect, please report it".into(),
            ],
            Self::UnresolvedPlaceholder { name, .. } => vec![
                format!("The template references '{name}', which is not a known option"),
                "This is a packaging defect, please report it".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidOptions(_) => ErrorCategory::Validation,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::TemplateSyntax { .. }
            | Self::UnresolvedPlaceholder { .. }
            | Self::UnrenderedMarker { .. } => ErrorCategory::Template,
            Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::EmptyOutput => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Template,
    NotFound,
    Internal,
}
