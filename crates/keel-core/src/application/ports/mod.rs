//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `keel-adapters` implement
//! these.
//!
//! - `TemplateStore`: raw template text resolution (the loader)
//! - `Filesystem`: file operations for the host-side writer

use std::path::Path;

use crate::domain::{DomainError, ProjectOptions, TemplateId};
use crate::error::KeelResult;

/// Port for raw template resolution.
///
/// Implemented by:
/// - `keel_adapters::InMemoryStore` (built-in variant table)
///
/// Given an identifier and the active options, return the raw text of the
/// best-matching variant. Architecture and database provider are the only
/// selectors that change which text is returned; feature toggles never
/// reach the store.
pub trait TemplateStore: Send + Sync {
    /// Resolve the raw template text for an identifier.
    ///
    /// # Errors
    /// `DomainError::TemplateNotFound` when no registered variant matches
    /// the identifier/options combination.
    fn resolve(&self, id: TemplateId, options: &ProjectOptions) -> Result<String, DomainError>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `keel_adapters::LocalFilesystem` (production)
/// - `keel_adapters::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> KeelResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> KeelResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> KeelResult<()>;
}
