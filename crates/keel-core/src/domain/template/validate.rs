//! Structural validation of templates and rendered output.
//!
//! The validator is policy-free: it only *reports* findings. Unknown names
//! are warnings here - the orchestrator decides severity (a warning in a
//! required file is escalated to a fatal error, in an optional file it is
//! surfaced and generation continues).
//!
//! Two passes exist per file:
//! - pre-render: every directive must reference a name in the options
//!   schema (loop bindings count inside their body);
//! - post-render: no marker syntax may survive in the output text.

use crate::domain::template::ast::{ParsedTemplate, TemplateNode};

/// Known directive name tables.
///
/// Must stay in sync with the tables
/// [`RenderContext::from_options`](crate::domain::template::RenderContext::from_options)
/// builds; the pre-render check is exactly "would the renderer resolve
/// this name".
pub mod schema {
    pub const VALUES: &[&str] = &[
        "project_name",
        "project_snake",
        "project_kebab",
        "project_pascal",
        "project_kind",
        "architecture",
        "database",
        "database_feature",
        "database_url",
        "year",
        "project_id",
        "rust_edition",
    ];

    pub const PREDICATES: &[&str] = &[
        "container",
        "orchestration",
        "sample_module",
        "fullstack",
        "api_only",
        "monolith",
        "modular_monolith",
        "microservices",
        "postgres",
        "mysql",
        "sqlite",
        "mssql",
    ];

    pub const COLLECTIONS: &[&str] = &["members", "modules"];

    pub fn is_value(name: &str) -> bool {
        VALUES.contains(&name)
    }

    pub fn is_predicate(name: &str) -> bool {
        PREDICATES.contains(&name)
    }

    pub fn is_collection(name: &str) -> bool {
        COLLECTIONS.contains(&name)
    }
}

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// What kind of problem a finding describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingCode {
    UnknownValue,
    UnknownPredicate,
    UnknownCollection,
    EmptyConditional,
    UnresolvedMarker,
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub code: FindingCode,
    /// The offending name or marker snippet.
    pub subject: String,
    pub message: String,
}

impl Finding {
    fn warning(code: FindingCode, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            subject: subject.into(),
            message: message.into(),
        }
    }

    fn info(code: FindingCode, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code,
            subject: subject.into(),
            message: message.into(),
        }
    }

    fn error(code: FindingCode, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Whether this finding reports a directive name missing from the
    /// options schema (the class the orchestrator escalates for required
    /// files).
    pub fn is_unknown_name(&self) -> bool {
        matches!(
            self.code,
            FindingCode::UnknownValue
                | FindingCode::UnknownPredicate
                | FindingCode::UnknownCollection
        )
    }
}

/// Pre-render check: directive names against the options schema.
pub fn validate_template(template: &ParsedTemplate) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut scope: Vec<String> = Vec::new();
    walk(&template.nodes, &mut scope, &mut findings);
    findings
}

fn walk(nodes: &[TemplateNode], scope: &mut Vec<String>, findings: &mut Vec<Finding>) {
    for node in nodes {
        match node {
            TemplateNode::Literal(_) => {}

            TemplateNode::Substitution { name } => {
                if !scope.iter().any(|b| b == name) && !schema::is_value(name) {
                    findings.push(Finding::warning(
                        FindingCode::UnknownValue,
                        name.clone(),
                        format!("substitution references unknown value '{name}'"),
                    ));
                }
            }

            TemplateNode::Conditional {
                predicate,
                then_branch,
                else_branch,
            } => {
                if !schema::is_predicate(predicate) {
                    findings.push(Finding::warning(
                        FindingCode::UnknownPredicate,
                        predicate.clone(),
                        format!("conditional references unknown predicate '{predicate}'"),
                    ));
                }
                if then_branch.is_empty() && else_branch.is_empty() {
                    findings.push(Finding::info(
                        FindingCode::EmptyConditional,
                        predicate.clone(),
                        format!("conditional on '{predicate}' has no content in either branch"),
                    ));
                }
                walk(then_branch, scope, findings);
                walk(else_branch, scope, findings);
            }

            TemplateNode::Repeat {
                binding,
                source,
                body,
            } => {
                if !schema::is_collection(source) {
                    findings.push(Finding::warning(
                        FindingCode::UnknownCollection,
                        source.clone(),
                        format!("repetition references unknown collection '{source}'"),
                    ));
                }
                scope.push(binding.clone());
                walk(body, scope, findings);
                scope.pop();
            }
        }
    }
}

/// Post-render check: no marker syntax may survive in the output.
///
/// Only opening markers are checked; a stray closing `}}` cannot occur
/// without its opener and legitimate generated Rust/TOML never contains
/// `{{` or `{%`.
pub fn validate_rendered(text: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    for marker in ["{{", "{%"] {
        if let Some(at) = text.find(marker) {
            let line = text[..at].matches('\n').count() + 1;
            findings.push(Finding::error(
                FindingCode::UnresolvedMarker,
                marker,
                format!("rendered output still contains '{marker}' at line {line}"),
            ));
        }
    }
    findings
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::parser::parse;

    #[test]
    fn clean_template_has_no_findings() {
        let t = parse(
            "{{ project_kebab }}{% if container %}x{% endif %}\
             {% for m in modules %}{{ m }}{% endfor %}",
        )
        .unwrap();
        assert!(validate_template(&t).is_empty());
    }

    #[test]
    fn unknown_value_is_warning() {
        let t = parse("{{ not_registered }}").unwrap();
        let findings = validate_template(&t);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].code, FindingCode::UnknownValue);
        assert_eq!(findings[0].subject, "not_registered");
    }

    #[test]
    fn unknown_predicate_and_collection_are_warnings() {
        let t = parse("{% if nope %}x{% endif %}{% for a in stuff %}{{ a }}{% endfor %}").unwrap();
        let codes: Vec<_> = validate_template(&t).iter().map(|f| f.code).collect();
        assert!(codes.contains(&FindingCode::UnknownPredicate));
        assert!(codes.contains(&FindingCode::UnknownCollection));
    }

    #[test]
    fn loop_binding_is_known_inside_body_only() {
        let t = parse("{% for m in modules %}{{ m }}{% endfor %}{{ m }}").unwrap();
        let findings = validate_template(&t);
        // the trailing {{ m }} is outside the loop scope
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, FindingCode::UnknownValue);
    }

    #[test]
    fn empty_conditional_is_info() {
        let t = parse("{% if container %}{% endif %}").unwrap();
        let findings = validate_template(&t);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Info);
    }

    #[test]
    fn rendered_output_with_markers_is_error() {
        let findings = validate_rendered("fine\nleft {{ over }}\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_error());
        assert!(findings[0].message.contains("line 2"));
    }

    #[test]
    fn clean_output_passes() {
        assert!(validate_rendered("[package]\nname = \"x\"\n").is_empty());
    }
}
