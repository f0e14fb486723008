//! The generation request: [`ProjectOptions`].
//!
//! `ProjectOptions` is an immutable value describing one generation request.
//! It is created once by the host (the CLI), validated at construction, and
//! then passed by reference through the whole pipeline - no component ever
//! mutates it.

use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;
use crate::domain::value_objects::{Architecture, DatabaseProvider, ProjectKind};

/// Optional infrastructure features.
///
/// Toggles decide *whether* a file is planned at all; they never influence
/// which variant the loader picks for a planned file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureToggles {
    /// Generate a Dockerfile.
    pub container: bool,
    /// Generate a compose orchestration manifest.
    pub orchestration: bool,
    /// Generate a sample module crate wired into the workspace.
    pub sample_module: bool,
}

/// Immutable description of one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOptions {
    name: String,
    output_root: PathBuf,
    kind: ProjectKind,
    architecture: Architecture,
    database: DatabaseProvider,
    features: FeatureToggles,
}

impl ProjectOptions {
    /// Start the builder pattern for fluent construction.
    pub fn builder(name: impl Into<String>) -> ProjectOptionsBuilder {
        ProjectOptionsBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn kind(&self) -> ProjectKind {
        self.kind
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn database(&self) -> DatabaseProvider {
        self.database
    }

    pub fn features(&self) -> FeatureToggles {
        self.features
    }
}

impl std::fmt::Display for ProjectOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {}, {})",
            self.name, self.kind, self.architecture, self.database
        )
    }
}

/// Builder for [`ProjectOptions`] with validation at `build()`.
#[derive(Debug, Clone)]
pub struct ProjectOptionsBuilder {
    name: String,
    output_root: PathBuf,
    kind: ProjectKind,
    architecture: Architecture,
    database: DatabaseProvider,
    features: FeatureToggles,
}

impl ProjectOptionsBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output_root: PathBuf::from("."),
            kind: ProjectKind::Api,
            architecture: Architecture::Monolith,
            database: DatabaseProvider::Postgres,
            features: FeatureToggles::default(),
        }
    }

    pub fn output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn kind(mut self, kind: ProjectKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn architecture(mut self, architecture: Architecture) -> Self {
        self.architecture = architecture;
        self
    }

    pub fn database(mut self, database: DatabaseProvider) -> Self {
        self.database = database;
        self
    }

    pub fn container(mut self, enabled: bool) -> Self {
        self.features.container = enabled;
        self
    }

    pub fn orchestration(mut self, enabled: bool) -> Self {
        self.features.orchestration = enabled;
        self
    }

    pub fn sample_module(mut self, enabled: bool) -> Self {
        self.features.sample_module = enabled;
        self
    }

    /// Consume the builder and construct validated options.
    ///
    /// # Errors
    ///
    /// `InvalidOptions` when the project name is empty, starts with a dot,
    /// contains path separators, or contains characters that cannot appear
    /// in a crate name.
    pub fn build(self) -> Result<ProjectOptions, DomainError> {
        validate_name(&self.name)?;
        Ok(ProjectOptions {
            name: self.name,
            output_root: self.output_root,
            kind: self.kind,
            architecture: self.architecture,
            database: self.database,
            features: self.features,
        })
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::InvalidOptions(
            "project name cannot be empty".into(),
        ));
    }
    if name.starts_with('.') {
        return Err(DomainError::InvalidOptions(
            "project name cannot start with '.'".into(),
        ));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(DomainError::InvalidOptions(
            "project name cannot contain path separators".into(),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' '))
    {
        return Err(DomainError::InvalidOptions(format!(
            "project name '{name}' contains unsupported characters"
        )));
    }
    Ok(())
}
