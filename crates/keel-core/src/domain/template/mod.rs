//! Template compilation pipeline: identifiers, AST, parser, cache,
//! renderer, and validator.
//!
//! The pieces compose in a fixed order per file (driven by the application
//! layer): resolve raw text → `cache::get_or_parse` → `validate_template`
//! → `RenderContext::render` → `validate_rendered`.

pub mod ast;
pub mod cache;
pub mod id;
pub mod parser;
pub mod render;
pub mod validate;

pub use ast::{ParsedTemplate, TemplateNode};
pub use cache::{Fingerprint, ParseCache, fingerprint};
pub use id::TemplateId;
pub use parser::parse;
pub use render::RenderContext;
pub use validate::{Finding, FindingCode, Severity, schema, validate_rendered, validate_template};
