//! Output of one generation run.
//!
//! `GeneratedProject` contains no business logic beyond its own
//! invariants: paths are unique, relative, and the tree is non-empty. The
//! host writes the files; the engine discards the value afterwards.

use std::collections::HashSet;

use crate::domain::common::RelativePath;
use crate::domain::error::DomainError;
use crate::domain::template::{Finding, TemplateId};

/// One generated file: output path (relative to the project root) plus
/// final text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: RelativePath,
    pub content: String,
}

/// A non-fatal validation finding attributed to the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFinding {
    pub template: TemplateId,
    pub finding: Finding,
}

/// The assembled file tree of one generation request, plus the non-fatal
/// findings collected along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedProject {
    pub files: Vec<GeneratedFile>,
    pub findings: Vec<FileFinding>,
}

impl GeneratedProject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_file(&mut self, path: RelativePath, content: String) {
        self.files.push(GeneratedFile { path, content });
    }

    pub fn push_finding(&mut self, template: TemplateId, finding: Finding) {
        self.findings.push(FileFinding { template, finding });
    }

    /// Look up a generated file by its relative path.
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path.as_str() == path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Validate tree invariants: non-empty, unique relative paths.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::EmptyOutput);
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_str().to_string()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.as_str().to_string(),
                });
            }
            if file.path.as_path().is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: file.path.to_string(),
                });
            }
        }

        Ok(())
    }
}
