//! In-memory template store with built-in variants.
//!
//! The store is the loader of the generation pipeline: a tagged lookup
//! table keyed by `(identifier, architecture?, database?)`, built once at
//! initialization. Resolution picks the most specific matching variant -
//! a `None` selector is a wildcard, each `Some` selector that matches adds
//! one specificity point, and among equal scores the earliest registration
//! wins (the built-in table never registers equal-score duplicates).

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use keel_core::{
    application::ports::TemplateStore,
    domain::{Architecture, DatabaseProvider, DomainError, ProjectOptions, TemplateId},
};

use crate::builtin_templates;

/// One registered raw template text plus its selectors.
#[derive(Debug, Clone)]
pub struct TemplateVariant {
    pub id: TemplateId,
    pub architecture: Option<Architecture>,
    pub database: Option<DatabaseProvider>,
    pub text: &'static str,
}

impl TemplateVariant {
    /// A variant that serves every configuration of its identifier.
    pub fn for_all(id: TemplateId, text: &'static str) -> Self {
        Self {
            id,
            architecture: None,
            database: None,
            text,
        }
    }

    /// A variant selected by architecture.
    pub fn for_architecture(id: TemplateId, architecture: Architecture, text: &'static str) -> Self {
        Self {
            id,
            architecture: Some(architecture),
            database: None,
            text,
        }
    }

    /// A variant selected by database provider.
    pub fn for_database(id: TemplateId, database: DatabaseProvider, text: &'static str) -> Self {
        Self {
            id,
            architecture: None,
            database: Some(database),
            text,
        }
    }

    /// Whether this variant applies under the given options.
    fn matches(&self, id: TemplateId, options: &ProjectOptions) -> bool {
        self.id == id
            && self.architecture.is_none_or(|a| a == options.architecture())
            && self.database.is_none_or(|d| d == options.database())
    }

    /// Count of non-wildcard selectors; higher wins resolution.
    fn specificity(&self) -> u8 {
        u8::from(self.architecture.is_some()) + u8::from(self.database.is_some())
    }
}

/// Thread-safe in-memory variant table.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Vec<TemplateVariant>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a store with the built-in variants loaded.
    pub fn with_builtin() -> Self {
        let store = Self::new();
        for variant in builtin_templates::all_variants() {
            store.insert(variant);
        }
        debug!(variants = store.len(), "built-in templates registered");
        store
    }

    /// Register a variant.
    pub fn insert(&self, variant: TemplateVariant) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(variant);
    }

    /// Number of registered variants.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for InMemoryStore {
    fn resolve(&self, id: TemplateId, options: &ProjectOptions) -> Result<String, DomainError> {
        let variants = self.inner.read().unwrap_or_else(PoisonError::into_inner);

        let mut best: Option<&TemplateVariant> = None;
        for variant in variants.iter().filter(|v| v.matches(id, options)) {
            // strictly-greater keeps the earliest registration on ties
            if best.is_none_or(|b| variant.specificity() > b.specificity()) {
                best = Some(variant);
            }
        }

        best.map(|v| v.text.to_string())
            .ok_or(DomainError::TemplateNotFound {
                id,
                architecture: options.architecture(),
                database: options.database(),
            })
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
