//! Scaffold Service - host-side writer.
//!
//! Coordinates a full scaffold: generate the tree in memory, then
//! materialize it under the output root. Writing is all-or-nothing from
//! the caller's perspective: on any write failure the partially written
//! project directory is removed (best effort).

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateStore},
        services::GenerateService,
    },
    domain::{GeneratedProject, ProjectOptions, template::render::to_kebab_case},
    error::KeelResult,
};

/// Main scaffolding service.
pub struct ScaffoldService {
    generator: GenerateService,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(store: Box<dyn TemplateStore>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            generator: GenerateService::new(store),
            filesystem,
        }
    }

    /// The project directory a scaffold would write to.
    pub fn project_dir(options: &ProjectOptions) -> PathBuf {
        options
            .output_root()
            .join(to_kebab_case(options.name()))
    }

    /// Generate and write a new project.
    ///
    /// Returns the generated tree (for reporting) after all files are on
    /// disk. Refuses to write into an existing directory.
    #[instrument(skip_all, fields(project = %options.name()))]
    pub fn scaffold(&self, options: &ProjectOptions) -> KeelResult<GeneratedProject> {
        let root = Self::project_dir(options);
        if self.filesystem.exists(&root) {
            return Err(ApplicationError::ProjectExists { path: root }.into());
        }

        let project = self.generator.generate(options)?;
        info!(files = project.file_count(), root = %root.display(), "writing project");

        match self.write_all(&root, &project) {
            Ok(()) => {
                info!("scaffold completed");
                Ok(project)
            }
            Err(e) => {
                warn!("write failed, attempting rollback");
                self.rollback(&root);
                Err(e)
            }
        }
    }

    /// Generate without writing (dry runs and plan display).
    pub fn preview(&self, options: &ProjectOptions) -> KeelResult<GeneratedProject> {
        self.generator.generate(options)
    }

    fn write_all(&self, root: &Path, project: &GeneratedProject) -> KeelResult<()> {
        self.filesystem.create_dir_all(root)?;

        for file in &project.files {
            let path = root.join(file.path.as_path());
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &file.content)?;
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(error = %e, path = %root.display(), "rollback failed");
        } else {
            info!("rollback successful");
        }
    }
}
