//! The generation plan: which files a configuration requires.
//!
//! Feature toggles are applied here and only here - the loader never sees
//! them. Architecture decides where the service crate lives; project kind
//! decides whether a web crate exists at all.

use crate::domain::common::RelativePath;
use crate::domain::options::ProjectOptions;
use crate::domain::template::TemplateId;
use crate::domain::template::render::to_kebab_case;
use crate::domain::value_objects::Architecture;

/// One file the active configuration requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub id: TemplateId,
    /// Output path relative to the project root.
    pub path: RelativePath,
    /// Whether unknown-name findings in this file abort generation.
    pub required: bool,
}

/// Ordered list of files for one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    files: Vec<PlannedFile>,
}

impl GenerationPlan {
    /// Determine the required file set from options.
    pub fn for_options(options: &ProjectOptions) -> Self {
        let kebab = to_kebab_case(options.name());
        let service_dir = service_crate_dir(options, &kebab);

        let mut files = Vec::new();
        let mut push = |id: TemplateId, path: String, required: bool| {
            files.push(PlannedFile {
                id,
                path: RelativePath::new(path),
                required,
            });
        };

        push(TemplateId::SolutionManifest, "Cargo.toml".into(), true);
        push(TemplateId::ApiManifest, format!("{service_dir}/Cargo.toml"), true);
        push(TemplateId::ApiMain, format!("{service_dir}/src/main.rs"), true);

        if options.kind().includes_web() {
            let web_dir = format!("crates/{kebab}-web");
            push(TemplateId::WebManifest, format!("{web_dir}/Cargo.toml"), true);
            push(TemplateId::WebMain, format!("{web_dir}/src/main.rs"), true);
        }

        push(TemplateId::AppSettings, "config/default.toml".into(), true);
        push(TemplateId::Ignore, ".gitignore".into(), true);
        push(TemplateId::Readme, "README.md".into(), false);

        if options.features().container {
            push(TemplateId::ContainerFile, "Dockerfile".into(), true);
        }
        if options.features().orchestration {
            push(TemplateId::ComposeFile, "compose.yaml".into(), true);
        }
        if options.features().sample_module {
            let module_dir = format!("crates/{kebab}-sample");
            push(
                TemplateId::ModuleManifest,
                format!("{module_dir}/Cargo.toml"),
                true,
            );
            push(TemplateId::ModuleLib, format!("{module_dir}/src/lib.rs"), true);
        }

        Self { files }
    }

    pub fn files(&self) -> &[PlannedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, id: TemplateId) -> bool {
        self.files.iter().any(|f| f.id == id)
    }
}

/// Directory of the service crate, relative to the project root.
fn service_crate_dir(options: &ProjectOptions, kebab: &str) -> String {
    match options.architecture() {
        // a single-crate workspace keeps the bare project name
        Architecture::Monolith => format!("crates/{kebab}"),
        Architecture::ModularMonolith | Architecture::Microservices => {
            format!("crates/{kebab}-api")
        }
    }
}

/// Workspace member directories for the active configuration.
///
/// The solution-manifest templates iterate this collection; it must agree
/// with the crate manifests the plan emits.
pub(crate) fn workspace_members(options: &ProjectOptions) -> Vec<String> {
    let kebab = to_kebab_case(options.name());
    let mut members = vec![service_crate_dir(options, &kebab)];
    if options.kind().includes_web() {
        members.push(format!("crates/{kebab}-web"));
    }
    if options.features().sample_module {
        members.push(format!("crates/{kebab}-sample"));
    }
    members
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{DatabaseProvider, ProjectKind};
    use std::collections::HashSet;

    fn base() -> crate::domain::options::ProjectOptionsBuilder {
        ProjectOptions::builder("Order Hub").database(DatabaseProvider::Postgres)
    }

    #[test]
    fn minimal_plan_has_core_files_only() {
        let plan = GenerationPlan::for_options(&base().build().unwrap());
        assert!(plan.contains(TemplateId::SolutionManifest));
        assert!(plan.contains(TemplateId::ApiManifest));
        assert!(plan.contains(TemplateId::ApiMain));
        assert!(plan.contains(TemplateId::AppSettings));
        assert!(!plan.contains(TemplateId::ContainerFile));
        assert!(!plan.contains(TemplateId::ComposeFile));
        assert!(!plan.contains(TemplateId::ModuleManifest));
        assert!(!plan.contains(TemplateId::WebManifest));
    }

    #[test]
    fn container_toggle_adds_exactly_one_file() {
        let without = GenerationPlan::for_options(&base().build().unwrap());
        let with = GenerationPlan::for_options(&base().container(true).build().unwrap());
        assert_eq!(with.len(), without.len() + 1);
        assert!(with.contains(TemplateId::ContainerFile));
    }

    #[test]
    fn sample_module_plans_crate_pair() {
        let plan = GenerationPlan::for_options(&base().sample_module(true).build().unwrap());
        assert!(plan.contains(TemplateId::ModuleManifest));
        assert!(plan.contains(TemplateId::ModuleLib));
        let manifest = plan
            .files()
            .iter()
            .find(|f| f.id == TemplateId::ModuleManifest)
            .unwrap();
        assert_eq!(manifest.path.as_str(), "crates/order-hub-sample/Cargo.toml");
    }

    #[test]
    fn fullstack_plans_web_crate() {
        let plan = GenerationPlan::for_options(
            &base().kind(ProjectKind::Fullstack).build().unwrap(),
        );
        assert!(plan.contains(TemplateId::WebManifest));
        assert!(plan.contains(TemplateId::WebMain));
    }

    #[test]
    fn monolith_uses_bare_crate_dir() {
        let plan = GenerationPlan::for_options(&base().build().unwrap());
        let manifest = plan
            .files()
            .iter()
            .find(|f| f.id == TemplateId::ApiManifest)
            .unwrap();
        assert_eq!(manifest.path.as_str(), "crates/order-hub/Cargo.toml");
    }

    #[test]
    fn modular_monolith_suffixes_api_crate() {
        let plan = GenerationPlan::for_options(
            &base()
                .architecture(Architecture::ModularMonolith)
                .build()
                .unwrap(),
        );
        let manifest = plan
            .files()
            .iter()
            .find(|f| f.id == TemplateId::ApiManifest)
            .unwrap();
        assert_eq!(manifest.path.as_str(), "crates/order-hub-api/Cargo.toml");
    }

    #[test]
    fn readme_is_the_only_optional_file() {
        let plan = GenerationPlan::for_options(
            &base()
                .container(true)
                .orchestration(true)
                .sample_module(true)
                .kind(ProjectKind::Fullstack)
                .build()
                .unwrap(),
        );
        let optional: Vec<_> = plan.files().iter().filter(|f| !f.required).collect();
        assert_eq!(optional.len(), 1);
        assert_eq!(optional[0].id, TemplateId::Readme);
    }

    #[test]
    fn paths_are_unique_across_the_full_matrix() {
        for arch in Architecture::ALL {
            for kind in ProjectKind::ALL {
                let plan = GenerationPlan::for_options(
                    &base()
                        .architecture(arch)
                        .kind(kind)
                        .container(true)
                        .orchestration(true)
                        .sample_module(true)
                        .build()
                        .unwrap(),
                );
                let paths: HashSet<_> = plan.files().iter().map(|f| f.path.as_str()).collect();
                assert_eq!(paths.len(), plan.len(), "duplicate path for {arch}/{kind}");
            }
        }
    }

    #[test]
    fn members_agree_with_planned_manifests() {
        let options = base()
            .kind(ProjectKind::Fullstack)
            .sample_module(true)
            .build()
            .unwrap();
        let plan = GenerationPlan::for_options(&options);
        for member in workspace_members(&options) {
            let manifest = format!("{member}/Cargo.toml");
            assert!(
                plan.files().iter().any(|f| f.path.as_str() == manifest),
                "member {member} has no planned manifest"
            );
        }
    }
}
