//! Stable logical identifiers for generated files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// The logical role of a generated file, independent of which variant text
/// is ultimately used.
///
/// Identifiers are unique within a generation pass; the loader may resolve
/// the same identifier to different raw text depending on the active
/// architecture and database provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    /// Workspace root manifest.
    SolutionManifest,
    /// Service crate manifest.
    ApiManifest,
    /// Service crate entry point.
    ApiMain,
    /// Web crate manifest (fullstack projects).
    WebManifest,
    /// Web crate entry point (fullstack projects).
    WebMain,
    /// Runtime settings file.
    AppSettings,
    /// VCS ignore file.
    Ignore,
    /// Project README.
    Readme,
    /// Container build definition.
    ContainerFile,
    /// Compose orchestration manifest.
    ComposeFile,
    /// Sample module crate manifest.
    ModuleManifest,
    /// Sample module crate library root.
    ModuleLib,
}

impl TemplateId {
    pub const ALL: [Self; 12] = [
        Self::SolutionManifest,
        Self::ApiManifest,
        Self::ApiMain,
        Self::WebManifest,
        Self::WebMain,
        Self::AppSettings,
        Self::Ignore,
        Self::Readme,
        Self::ContainerFile,
        Self::ComposeFile,
        Self::ModuleManifest,
        Self::ModuleLib,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SolutionManifest => "solution-manifest",
            Self::ApiManifest => "api-manifest",
            Self::ApiMain => "api-main",
            Self::WebManifest => "web-manifest",
            Self::WebMain => "web-main",
            Self::AppSettings => "app-settings",
            Self::Ignore => "ignore",
            Self::Readme => "readme",
            Self::ContainerFile => "container-file",
            Self::ComposeFile => "compose-file",
            Self::ModuleManifest => "module-manifest",
            Self::ModuleLib => "module-lib",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DomainError::InvalidOptions(format!("unknown template id: {s}")))
    }
}
