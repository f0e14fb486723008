//! Implementation of the `keel upgrade` command.
//!
//! Reads two dependency manifests, diffs them in the core, and renders
//! the comparison. The network-facing part of the upgrade workflow (release
//! discovery and manifest download) is out of scope here: this command
//! consumes files the caller already has.

use std::path::Path;

use owo_colors::OwoColorize;
use tracing::{info, instrument};

use keel_core::upgrade::{ReleaseDescriptor, UpgradeReport, parse_manifest};

use crate::{
    cli::{GlobalArgs, UpgradeArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `keel upgrade` command.
#[instrument(skip_all)]
pub fn execute(args: UpgradeArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    if args.current == args.latest {
        return Err(CliError::InvalidInput {
            message: "--current and --latest point at the same manifest".into(),
        });
    }

    let current = parse_manifest(&read_manifest(&args.current)?);
    let latest = parse_manifest(&read_manifest(&args.latest)?);

    let release = args.tag.map(|tag| ReleaseDescriptor {
        tag,
        prerelease: args.prerelease,
        notes: String::new(),
    });

    let report = UpgradeReport::new(release, &current, &latest);
    info!(
        added = report.diff.added.len(),
        removed = report.diff.removed.len(),
        updated = report.diff.updated.len(),
        breaking = report.diff.breaking_count(),
        "manifests compared"
    );

    if args.json {
        output.print(&serde_json::to_string_pretty(&report).unwrap_or_default())?;
        return Ok(());
    }

    render_report(&report, &output)
}

fn read_manifest(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::ManifestUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

fn render_report(report: &UpgradeReport, output: &OutputManager) -> CliResult<()> {
    if let Some(release) = &report.release {
        let suffix = if release.prerelease {
            " (pre-release)"
        } else {
            ""
        };
        output.header(&format!("Release {}{suffix}", release.tag))?;
    }

    let diff = &report.diff;
    if diff.is_empty() {
        output.success("Dependencies are identical, nothing to do")?;
        return Ok(());
    }

    if !diff.added.is_empty() {
        output.header("Added")?;
        for change in &diff.added {
            output.print(&format!("  + {:<24} {}", change.name, change.version))?;
        }
    }

    if !diff.removed.is_empty() {
        output.header("Removed")?;
        for change in &diff.removed {
            output.print(&format!("  - {:<24} {}", change.name, change.version))?;
        }
    }

    if !diff.updated.is_empty() {
        output.header("Updated")?;
        for update in &diff.updated {
            let arrow = format!(
                "  ~ {:<24} {} -> {}",
                update.name, update.from, update.to
            );
            if update.breaking {
                let line = if output.supports_color() {
                    format!("{arrow} {}", "BREAKING".red().bold())
                } else {
                    format!("{arrow} BREAKING")
                };
                output.print(&line)?;
            } else {
                output.print(&arrow)?;
            }
        }
    }

    output.print("")?;
    let summary = format!(
        "{} added, {} removed, {} updated ({} breaking)",
        diff.added.len(),
        diff.removed.len(),
        diff.updated.len(),
        diff.breaking_count(),
    );
    if diff.breaking_count() > 0 {
        output.warning(&summary)?;
    } else {
        output.success(&summary)?;
    }

    Ok(())
}
