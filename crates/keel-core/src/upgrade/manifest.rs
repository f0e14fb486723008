//! Dependency-manifest parsing.
//!
//! Extracts `package name → version` pairs from Cargo-style manifest text.
//! Only the dependency tables are read; everything else is ignored. Within
//! a dependency table two entry forms are recognized:
//!
//! ```toml
//! serde = "1.0"
//! tokio = { version = "1.40", features = ["full"] }
//! ```
//!
//! Path-, git-, and workspace-only entries carry no version and are
//! skipped. A line that is shaped like a package declaration but cannot be
//! interpreted produces a [`ManifestParseError`] - logged and skipped, so
//! parsing always completes.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::warn;

/// Package name → version string. `BTreeMap` keeps iteration sorted by
/// package name, which downstream display relies on.
pub type PackageVersionMap = BTreeMap<String, String>;

/// A dependency entry that could not be interpreted. Recoverable: the
/// offending line is excluded from the resulting map.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: cannot parse dependency entry '{content}': {reason}")]
pub struct ManifestParseError {
    pub line: usize,
    pub content: String,
    pub reason: String,
}

/// Table headers whose entries are treated as package declarations.
const DEPENDENCY_TABLES: &[&str] = &[
    "[dependencies]",
    "[dev-dependencies]",
    "[build-dependencies]",
    "[workspace.dependencies]",
];

/// Parse manifest text into a version map, logging and skipping malformed
/// entries.
pub fn parse_manifest(text: &str) -> PackageVersionMap {
    let (map, errors) = parse_manifest_verbose(text);
    for error in &errors {
        warn!(%error, "skipping malformed manifest entry");
    }
    map
}

/// Like [`parse_manifest`], but returns the per-line errors alongside the
/// map instead of logging them.
pub fn parse_manifest_verbose(text: &str) -> (PackageVersionMap, Vec<ManifestParseError>) {
    let mut map = PackageVersionMap::new();
    let mut errors = Vec::new();
    let mut in_dependency_table = false;

    for (index, raw_line) in text.lines().enumerate() {
        let line = strip_comment(raw_line).trim();

        if line.starts_with('[') {
            in_dependency_table = DEPENDENCY_TABLES.contains(&line);
            continue;
        }
        if !in_dependency_table || line.is_empty() {
            continue;
        }

        match parse_entry(line) {
            Ok(Some((name, version))) => {
                map.insert(name, version);
            }
            Ok(None) => {}
            Err(mut error) => {
                error.line = index + 1;
                errors.push(error);
            }
        }
    }

    (map, errors)
}

/// Interpret one line inside a dependency table.
///
/// Returns `Ok(None)` for lines that are not versioned package
/// declarations (continuation lines, path/workspace entries), `Err` for
/// lines that are package-shaped but malformed. The `line` field of the
/// error is filled in by the caller.
pub fn parse_entry(line: &str) -> Result<Option<(String, String)>, ManifestParseError> {
    let Some((name_part, value_part)) = line.split_once('=') else {
        return Ok(None);
    };
    let name = name_part.trim();
    if !is_package_name(name) {
        return Ok(None);
    }
    let value = value_part.trim();

    let malformed = |reason: &str| ManifestParseError {
        line: 0,
        content: line.to_string(),
        reason: reason.to_string(),
    };

    if let Some(rest) = value.strip_prefix('"') {
        let version = rest
            .split_once('"')
            .map(|(v, _)| v)
            .ok_or_else(|| malformed("unterminated version string"))?;
        if version.is_empty() {
            return Err(malformed("empty version string"));
        }
        return Ok(Some((name.to_string(), version.to_string())));
    }

    if let Some(rest) = value.strip_prefix('{') {
        let inner = rest
            .rsplit_once('}')
            .map(|(body, _)| body)
            .ok_or_else(|| malformed("unterminated inline table"))?;
        // commas inside feature arrays split harmlessly: the `version = "…"`
        // fragment stays intact in its own piece
        for piece in inner.split(',') {
            let Some((key, val)) = piece.split_once('=') else {
                continue;
            };
            if key.trim() != "version" {
                continue;
            }
            let val = val.trim();
            let version = val
                .strip_prefix('"')
                .and_then(|v| v.split_once('"'))
                .map(|(v, _)| v)
                .ok_or_else(|| malformed("malformed version in inline table"))?;
            if version.is_empty() {
                return Err(malformed("empty version string"));
            }
            return Ok(Some((name.to_string(), version.to_string())));
        }
        // no version key: path/git/workspace dependency
        return Ok(None);
    }

    Err(malformed("expected quoted version or inline table"))
}

/// Whether `s` looks like a package key (and not, say, a dotted config
/// path or an array continuation).
fn is_package_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Strip a trailing `#` comment, honoring quoted strings.
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[package]
name = "demo"
version = "0.3.0"

[dependencies]
serde = "1.0"
tokio = { version = "1.40", features = ["rt-multi-thread", "macros"] }
local-helper = { path = "../helper" }
shared = { workspace = true }
axum = "0.8"   # web framework

[dev-dependencies]
tempfile = "3.8"

[profile.release]
opt-level = 3
"#;

    #[test]
    fn parses_dependency_tables_only() {
        let map = parse_manifest(MANIFEST);
        assert_eq!(map.get("serde").map(String::as_str), Some("1.0"));
        assert_eq!(map.get("tokio").map(String::as_str), Some("1.40"));
        assert_eq!(map.get("axum").map(String::as_str), Some("0.8"));
        assert_eq!(map.get("tempfile").map(String::as_str), Some("3.8"));
        // [package] version is not a dependency
        assert!(!map.contains_key("name"));
        assert!(!map.contains_key("version"));
        // profile settings are outside dependency tables
        assert!(!map.contains_key("opt-level"));
    }

    #[test]
    fn unversioned_entries_are_skipped_silently() {
        let (map, errors) = parse_manifest_verbose(MANIFEST);
        assert!(!map.contains_key("local-helper"));
        assert!(!map.contains_key("shared"));
        assert!(errors.is_empty());
    }

    #[test]
    fn malformed_entries_are_collected_not_fatal() {
        let text = "[dependencies]\nserde = \"1.0\nbroken = 1.0\nfine = \"2.0\"\n";
        let (map, errors) = parse_manifest_verbose(text);
        assert_eq!(map.get("fine").map(String::as_str), Some("2.0"));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].line, 2);
        assert!(errors[0].reason.contains("unterminated"));
        assert_eq!(errors[1].line, 3);
    }

    #[test]
    fn empty_version_is_malformed() {
        let (map, errors) = parse_manifest_verbose("[dependencies]\nserde = \"\"\n");
        assert!(map.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].reason.contains("empty version"));
    }

    #[test]
    fn inline_table_without_closing_brace_is_malformed() {
        let (_, errors) =
            parse_manifest_verbose("[dependencies]\ntokio = { version = \"1.0\"\n");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].reason.contains("unterminated inline table"));
    }

    #[test]
    fn comments_do_not_confuse_the_parser() {
        let map = parse_manifest("[dependencies]\nserde = \"1.0\" # \"not a version\"\n");
        assert_eq!(map.get("serde").map(String::as_str), Some("1.0"));
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(parse_manifest("").is_empty());
        assert!(parse_manifest("just prose, no tables").is_empty());
    }
}
