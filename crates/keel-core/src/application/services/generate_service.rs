//! Generate Service - the template engine orchestrator.
//!
//! Drives the per-file pipeline for every file the active configuration
//! requires:
//!
//! ```text
//! plan → store.resolve → cache/parse → validate → render → verify
//! ```
//!
//! The request is atomic: the first fatal error aborts with a structured
//! failure naming the offending file and stage, and no partial file list
//! escapes. Non-fatal findings are collected and returned with the tree.

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        error::{ApplicationError, GenerationStage},
        ports::TemplateStore,
    },
    domain::{
        DomainError, GeneratedProject, GenerationPlan, ParseCache, PlannedFile, ProjectOptions,
        RenderContext,
        template::{parser, validate_rendered, validate_template},
    },
    error::KeelResult,
};

/// Main generation service.
///
/// Owns the parse cache for the lifetime of the service, so repeated
/// `generate` calls reuse parsed templates. The cache is the only shared
/// mutable state; everything else is per-call.
pub struct GenerateService {
    store: Box<dyn TemplateStore>,
    cache: ParseCache,
}

impl GenerateService {
    /// Create a new generate service with the given template store.
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self {
            store,
            cache: ParseCache::new(),
        }
    }

    /// The shared parse cache (exposed for instrumentation in tests).
    pub fn cache(&self) -> &ParseCache {
        &self.cache
    }

    /// Generate the full file tree for one options value.
    ///
    /// Fails fast on the first fatal error; the returned error identifies
    /// the template and the pipeline stage that failed.
    #[instrument(skip_all, fields(project = %options.name()))]
    pub fn generate(&self, options: &ProjectOptions) -> KeelResult<GeneratedProject> {
        let plan = GenerationPlan::for_options(options);
        let context = RenderContext::from_options(options);
        let mut project = GeneratedProject::new();

        info!(files = plan.len(), "generation started");

        for planned in plan.files() {
            let content = self.generate_file(planned, options, &context, &mut project)?;
            project.push_file(planned.path.clone(), content);
        }

        // plan bugs (duplicate or absolute paths) surface here, not at the host
        project.validate()?;

        if !project.findings.is_empty() {
            warn!(
                findings = project.findings.len(),
                "generation completed with findings"
            );
        }
        info!(files = project.file_count(), "generation complete");
        Ok(project)
    }

    /// Run the per-file pipeline, returning the rendered text.
    fn generate_file(
        &self,
        planned: &PlannedFile,
        options: &ProjectOptions,
        context: &RenderContext,
        project: &mut GeneratedProject,
    ) -> KeelResult<String> {
        let fail = |stage: GenerationStage, source: DomainError| ApplicationError::Generation {
            template: planned.id,
            stage,
            source,
        };

        let raw = self
            .store
            .resolve(planned.id, options)
            .map_err(|e| fail(GenerationStage::Resolve, e))?;

        let parsed = self
            .cache
            .get_or_parse(planned.id, &raw, parser::parse)
            .map_err(|e| fail(GenerationStage::Parse, e))?;

        // Pre-render: unknown names are fatal only in required files.
        for finding in validate_template(&parsed) {
            if planned.required && finding.is_unknown_name() {
                return Err(fail(
                    GenerationStage::Validate,
                    DomainError::UnresolvedPlaceholder {
                        name: finding.subject.clone(),
                        directive: "schema",
                    },
                )
                .into());
            }
            debug!(template = %planned.id, finding = %finding.message, "validation finding");
            project.push_finding(planned.id, finding);
        }

        let text = context
            .render(&parsed)
            .map_err(|e| fail(GenerationStage::Render, e))?;

        // Post-render: leftover marker syntax means a renderer gap.
        for finding in validate_rendered(&text) {
            if finding.is_error() {
                return Err(fail(
                    GenerationStage::Verify,
                    DomainError::UnrenderedMarker {
                        path: planned.path.to_string(),
                        marker: finding.subject.clone(),
                    },
                )
                .into());
            }
            project.push_finding(planned.id, finding);
        }

        Ok(text)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Architecture, DatabaseProvider, TemplateId};
    use mockall::mock;

    mock! {
        Store {}
        impl TemplateStore for Store {
            fn resolve(
                &self,
                id: TemplateId,
                options: &ProjectOptions,
            ) -> Result<String, DomainError>;
        }
    }

    fn options() -> ProjectOptions {
        ProjectOptions::builder("demo").build().unwrap()
    }

    #[test]
    fn resolve_failure_names_template_and_stage() {
        let mut store = MockStore::new();
        store.expect_resolve().returning(|id, opts| {
            Err(DomainError::TemplateNotFound {
                id,
                architecture: opts.architecture(),
                database: opts.database(),
            })
        });

        let service = GenerateService::new(Box::new(store));
        match service.generate(&options()) {
            Err(crate::error::KeelError::Application(ApplicationError::Generation {
                template,
                stage,
                source,
            })) => {
                assert_eq!(template, TemplateId::SolutionManifest);
                assert_eq!(stage, GenerationStage::Resolve);
                assert!(matches!(
                    source,
                    DomainError::TemplateNotFound {
                        architecture: Architecture::Monolith,
                        database: DatabaseProvider::Postgres,
                        ..
                    }
                ));
            }
            other => panic!("expected generation failure, got {other:?}"),
        }
    }

    #[test]
    fn syntax_error_fails_at_parse_stage() {
        let mut store = MockStore::new();
        store
            .expect_resolve()
            .returning(|_, _| Ok("{{ unterminated".to_string()));

        let service = GenerateService::new(Box::new(store));
        match service.generate(&options()) {
            Err(crate::error::KeelError::Application(ApplicationError::Generation {
                stage,
                source,
                ..
            })) => {
                assert_eq!(stage, GenerationStage::Parse);
                assert!(matches!(source, DomainError::TemplateSyntax { .. }));
            }
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn unknown_name_in_required_file_fails_at_validate_stage() {
        let mut store = MockStore::new();
        store
            .expect_resolve()
            .returning(|_, _| Ok("{{ no_such_value }}".to_string()));

        let service = GenerateService::new(Box::new(store));
        match service.generate(&options()) {
            Err(crate::error::KeelError::Application(ApplicationError::Generation {
                stage,
                source,
                ..
            })) => {
                assert_eq!(stage, GenerationStage::Validate);
                assert!(matches!(
                    source,
                    DomainError::UnresolvedPlaceholder { .. }
                ));
            }
            other => panic!("expected validate failure, got {other:?}"),
        }
    }

    #[test]
    fn generate_succeeds_with_benign_store() {
        let mut store = MockStore::new();
        store
            .expect_resolve()
            .returning(|id, _| Ok(format!("# {} for {{{{ project_kebab }}}}\n", id.as_str())));

        let service = GenerateService::new(Box::new(store));
        let project = service.generate(&options()).unwrap();

        assert!(project.file_count() > 0);
        assert!(project.findings.is_empty());
        let manifest = project.file("Cargo.toml").unwrap();
        assert!(manifest.content.contains("demo"));
    }

    #[test]
    fn repeated_generates_reuse_the_cache() {
        let mut store = MockStore::new();
        store
            .expect_resolve()
            .returning(|_, _| Ok("static text".to_string()));

        let service = GenerateService::new(Box::new(store));
        service.generate(&options()).unwrap();
        let first_count = service.cache().parse_count();
        service.generate(&options()).unwrap();

        // identical content: every file resolves to the same fingerprint
        assert_eq!(service.cache().parse_count(), first_count);
    }
}
