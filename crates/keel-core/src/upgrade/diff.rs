//! Semantic diffing of two dependency maps.
//!
//! A package appears in exactly one of the three lists. Diffing is pure
//! and deterministic: the same inputs always yield the same output, with
//! all lists sorted by package name (inherited from the `BTreeMap`
//! iteration order).

use serde::Serialize;

use crate::upgrade::manifest::PackageVersionMap;
use crate::upgrade::version::is_breaking;

/// A package present in only one of the two maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageChange {
    pub name: String,
    pub version: String,
}

/// A package whose version changed between the two maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageUpdate {
    pub name: String,
    pub from: String,
    pub to: String,
    /// True exactly when the leading numeric component differs.
    pub breaking: bool,
}

/// The result of diffing a current manifest against a latest one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionDiff {
    pub added: Vec<PackageChange>,
    pub removed: Vec<PackageChange>,
    pub updated: Vec<PackageUpdate>,
}

impl VersionDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }

    pub fn breaking_count(&self) -> usize {
        self.updated.iter().filter(|u| u.breaking).count()
    }
}

/// Diff two version maps.
///
/// - present only in `latest` → added
/// - present only in `current` → removed
/// - present in both with differing versions → updated
pub fn diff(current: &PackageVersionMap, latest: &PackageVersionMap) -> VersionDiff {
    let mut result = VersionDiff::default();

    for (name, version) in latest {
        if !current.contains_key(name) {
            result.added.push(PackageChange {
                name: name.clone(),
                version: version.clone(),
            });
        }
    }

    for (name, version) in current {
        match latest.get(name) {
            None => result.removed.push(PackageChange {
                name: name.clone(),
                version: version.clone(),
            }),
            Some(new_version) if new_version != version => {
                result.updated.push(PackageUpdate {
                    name: name.clone(),
                    from: version.clone(),
                    to: new_version.clone(),
                    breaking: is_breaking(version, new_version),
                });
            }
            Some(_) => {}
        }
    }

    result
}

/// A release as described by the hosting forge, supplied by the
/// network-facing collaborator. This core never fetches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseDescriptor {
    /// Version tag, e.g. `v0.4.0`.
    pub tag: String,
    pub prerelease: bool,
    /// Free-text release notes.
    pub notes: String,
}

/// A diff paired with the release it describes, ready for display by the
/// upgrade workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeReport {
    pub release: Option<ReleaseDescriptor>,
    pub diff: VersionDiff,
}

impl UpgradeReport {
    pub fn new(
        release: Option<ReleaseDescriptor>,
        current: &PackageVersionMap,
        latest: &PackageVersionMap,
    ) -> Self {
        Self {
            release,
            diff: diff(current, latest),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
