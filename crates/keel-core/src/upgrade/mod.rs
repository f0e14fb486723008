//! Version comparer for the upgrade workflow.
//!
//! Independently usable and fully pure: parse dependency manifests into
//! version maps, order versions, and diff two maps into added/removed/
//! updated entries with breaking-change flags. Shares no state with the
//! template engine; malformed manifest content never aborts - offending
//! entries are excluded and diffing always produces a result.

pub mod diff;
pub mod manifest;
pub mod version;

pub use diff::{
    PackageChange, PackageUpdate, ReleaseDescriptor, UpgradeReport, VersionDiff, diff,
};
pub use manifest::{
    ManifestParseError, PackageVersionMap, parse_entry, parse_manifest, parse_manifest_verbose,
};
pub use version::{compare_versions, is_breaking, leading_component};
