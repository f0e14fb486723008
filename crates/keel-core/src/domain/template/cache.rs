//! Memoization of parsed templates.
//!
//! The cache is keyed by `(identifier, content fingerprint)` so a template
//! whose raw text changes between runs (or between variants resolving to
//! the same identifier) is never served stale. It guarantees at most one
//! parse per distinct key within a process lifetime; there is no eviction -
//! the key space is bounded by the fixed set of built-in templates.
//!
//! The cache is an explicitly passed context object, never ambient state:
//! parallel generation requests each own (or share) their cache instance,
//! and all access goes through the internal lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::error::DomainError;
use crate::domain::template::ast::ParsedTemplate;
use crate::domain::template::id::TemplateId;

/// Content-derived key component. BLAKE3 over the raw template bytes.
pub type Fingerprint = [u8; 32];

/// Fingerprint raw template text.
pub fn fingerprint(raw: &str) -> Fingerprint {
    *blake3::hash(raw.as_bytes()).as_bytes()
}

/// Shared parse cache for one process run.
#[derive(Debug, Default)]
pub struct ParseCache {
    inner: RwLock<HashMap<(TemplateId, Fingerprint), Arc<ParsedTemplate>>>,
    /// Number of times a parse function was actually invoked. Exposed so
    /// callers can verify the at-most-one-parse guarantee.
    parses: AtomicUsize,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached parse for `(id, fingerprint(raw))`, or invoke
    /// `parse_fn`, store, and return the fresh entry.
    ///
    /// The write lock is held across `parse_fn` so two concurrent callers
    /// with the same key cannot both parse.
    pub fn get_or_parse<F>(
        &self,
        id: TemplateId,
        raw: &str,
        parse_fn: F,
    ) -> Result<Arc<ParsedTemplate>, DomainError>
    where
        F: FnOnce(&str) -> Result<ParsedTemplate, DomainError>,
    {
        let key = (id, fingerprint(raw));

        // A poisoned lock only means another thread panicked mid-access;
        // the map itself is still consistent (inserts are atomic).
        let mut map = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(hit) = map.get(&key) {
            return Ok(Arc::clone(hit));
        }

        self.parses.fetch_add(1, Ordering::Relaxed);
        let parsed = Arc::new(parse_fn(raw)?);
        map.insert(key, Arc::clone(&parsed));
        Ok(parsed)
    }

    /// Number of distinct entries currently cached.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times a parse function has actually run.
    pub fn parse_count(&self) -> usize {
        self.parses.load(Ordering::Relaxed)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::parser::parse;

    #[test]
    fn parses_once_per_identifier_and_content() {
        let cache = ParseCache::new();
        let raw = "hello {{ project_name }}";

        let first = cache
            .get_or_parse(TemplateId::Readme, raw, parse)
            .unwrap();
        let second = cache
            .get_or_parse(TemplateId::Readme, raw, parse)
            .unwrap();

        assert_eq!(cache.parse_count(), 1);
        assert_eq!(cache.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn different_content_reparses() {
        let cache = ParseCache::new();
        cache
            .get_or_parse(TemplateId::Readme, "v1", parse)
            .unwrap();
        cache
            .get_or_parse(TemplateId::Readme, "v2", parse)
            .unwrap();
        assert_eq!(cache.parse_count(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn different_identifier_same_content_reparses() {
        let cache = ParseCache::new();
        cache
            .get_or_parse(TemplateId::Readme, "same", parse)
            .unwrap();
        cache
            .get_or_parse(TemplateId::Ignore, "same", parse)
            .unwrap();
        assert_eq!(cache.parse_count(), 2);
    }

    #[test]
    fn parse_errors_are_not_cached() {
        let cache = ParseCache::new();
        let bad = "{{ unterminated";
        assert!(cache.get_or_parse(TemplateId::Readme, bad, parse).is_err());
        assert!(cache.is_empty());
        // a retry parses again (and fails again) rather than serving a hit
        assert!(cache.get_or_parse(TemplateId::Readme, bad, parse).is_err());
        assert_eq!(cache.parse_count(), 2);
    }

    #[test]
    fn fingerprints_differ_for_different_text() {
        assert_ne!(fingerprint("a"), fingerprint("b"));
        assert_eq!(fingerprint("a"), fingerprint("a"));
    }
}
