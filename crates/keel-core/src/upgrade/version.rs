//! Ordered version comparison.
//!
//! Dotted-numeric precedence with pre-release handling:
//! - segments compare numerically when both parse as integers;
//! - non-numeric segments fall back to lexicographic comparison;
//! - missing segments count as zero (`1.2` == `1.2.0`);
//! - a pre-release (`1.0.0-rc.1`) sorts before its release (`1.0.0`).

use std::cmp::Ordering;

/// Compare two version strings.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (a_core, a_pre) = split_prerelease(a);
    let (b_core, b_pre) = split_prerelease(b);

    match compare_dotted(a_core, b_core) {
        Ordering::Equal => compare_prerelease(a_pre, b_pre),
        other => other,
    }
}

/// The leading (major) component of a version, pre-release stripped.
pub fn leading_component(version: &str) -> &str {
    let (core, _) = split_prerelease(version);
    core.split('.').next().unwrap_or(core)
}

/// Whether an update from `from` to `to` crosses a major-version boundary.
///
/// The rule is literal: the leading numeric components differ. Non-numeric
/// leading components are compared as strings.
pub fn is_breaking(from: &str, to: &str) -> bool {
    let a = leading_component(from);
    let b = leading_component(to);
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x != y,
        _ => a != b,
    }
}

fn split_prerelease(version: &str) -> (&str, Option<&str>) {
    match version.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (version, None),
    }
}

fn compare_dotted(a: &str, b: &str) -> Ordering {
    let mut xs = a.split('.');
    let mut ys = b.split('.');
    loop {
        match (xs.next(), ys.next()) {
            (None, None) => return Ordering::Equal,
            (x, y) => {
                let ordering = compare_segment(x.unwrap_or("0"), y.unwrap_or("0"));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn compare_segment(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

fn compare_prerelease(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        // a pre-release precedes its corresponding release
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(x), Some(y)) => compare_dotted(x, y),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_ordering() {
        assert_eq!(compare_versions("1.2.0", "1.3.0"), Ordering::Less);
        assert_eq!(compare_versions("2.0.0", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.0.0", "1.0.0"), Ordering::Equal);
    }

    #[test]
    fn numeric_not_lexicographic() {
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("0.2.0", "0.10.0"), Ordering::Less);
    }

    #[test]
    fn missing_segments_are_zero() {
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("1", "1.0.1"), Ordering::Less);
    }

    #[test]
    fn prerelease_sorts_before_release() {
        assert_eq!(compare_versions("1.0.0-rc.1", "1.0.0"), Ordering::Less);
        assert_eq!(compare_versions("1.0.0", "1.0.0-beta"), Ordering::Greater);
        assert_eq!(
            compare_versions("1.0.0-alpha", "1.0.0-beta"),
            Ordering::Less
        );
        assert_eq!(compare_versions("1.0.0-rc.2", "1.0.0-rc.10"), Ordering::Less);
    }

    #[test]
    fn non_numeric_segments_fall_back_to_lexicographic() {
        assert_eq!(compare_versions("1.x", "1.y"), Ordering::Less);
        assert_eq!(compare_versions("1.x", "1.x"), Ordering::Equal);
    }

    #[test]
    fn breaking_rule_is_leading_component() {
        assert!(is_breaking("1.9.9", "2.0.0"));
        assert!(!is_breaking("1.0.0", "1.1.0"));
        // no 0.x special-casing: 0.1 -> 0.2 is not breaking
        assert!(!is_breaking("0.1.0", "0.2.0"));
        assert!(is_breaking("0.9.0", "1.0.0"));
        // pre-release does not affect the leading component
        assert!(!is_breaking("2.0.0-rc.1", "2.0.0"));
    }

    #[test]
    fn leading_component_extraction() {
        assert_eq!(leading_component("3.2.1"), "3");
        assert_eq!(leading_component("4"), "4");
        assert_eq!(leading_component("2.0.0-beta.1"), "2");
    }
}
