//! Implementation of the `keel new` command.
//!
//! Responsibility: translate CLI arguments into `ProjectOptions`, call the
//! core scaffold service, and display results. No business logic lives
//! here.

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info, instrument};

use keel_adapters::{InMemoryStore, LocalFilesystem};
use keel_core::{
    application::ScaffoldService,
    domain::{ProjectOptions, Severity},
};

use crate::{
    cli::{GlobalArgs, NewArgs, OptionArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `keel new` command.
///
/// Dispatch sequence:
/// 1. Convert CLI args to core `ProjectOptions`
/// 2. Confirm with user unless `--yes` or `--quiet`
/// 3. Early-exit if `--dry-run` (generate in memory, print the tree)
/// 4. Execute scaffolding via `ScaffoldService`
/// 5. Print findings and next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    _config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let options = build_options(&args.name, &args.options, args.output.clone())?;

    debug!(
        kind = %options.kind(),
        architecture = %options.architecture(),
        database = %options.database(),
        "options resolved"
    );

    let project_dir = ScaffoldService::project_dir(&options);

    // 2. Show configuration and confirm
    if !global.quiet && !args.yes && !args.dry_run {
        show_configuration(&options, &project_dir, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let service = ScaffoldService::new(
        Box::new(InMemoryStore::with_builtin()),
        Box::new(LocalFilesystem::new()),
    );

    // 3. Dry run: generate in memory, describe, write nothing.
    if args.dry_run {
        let project = service.preview(&options)?;
        output.info(&format!(
            "Dry run: would create {} files under {}",
            project.file_count(),
            project_dir.display(),
        ))?;
        for file in &project.files {
            output.print(&format!("  {}", file.path))?;
        }
        report_findings(&project.findings, &output)?;
        return Ok(());
    }

    // 4. Scaffold onto disk
    output.header(&format!("Creating '{}'...", args.name))?;
    info!(path = %project_dir.display(), "scaffold started");

    let project = service.scaffold(&options)?;

    info!(files = project.file_count(), "scaffold completed");
    report_findings(&project.findings, &output)?;

    // 5. Success + next steps
    output.success(&format!(
        "Project '{}' created ({} files)",
        args.name,
        project.file_count()
    ))?;

    if !output.is_quiet() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", project_dir.display()))?;
        if options.features().orchestration {
            output.print("  docker compose up -d")?;
        }
        output.print("  cargo run")?;
    }

    Ok(())
}

/// Convert CLI flags into validated core options.
pub fn build_options(
    name: &str,
    args: &OptionArgs,
    output_root: Option<PathBuf>,
) -> CliResult<ProjectOptions> {
    let mut builder = ProjectOptions::builder(name)
        .kind(args.kind.into())
        .architecture(args.architecture.into())
        .database(args.database.into())
        .container(args.container)
        .orchestration(args.orchestration)
        .sample_module(args.sample_module);

    if let Some(root) = output_root {
        builder = builder.output_root(root);
    }

    builder
        .build()
        .map_err(|e| CliError::Core(keel_core::error::KeelError::Domain(e)))
}

/// Surface non-fatal findings collected during generation.
fn report_findings(
    findings: &[keel_core::domain::FileFinding],
    output: &OutputManager,
) -> CliResult<()> {
    for entry in findings {
        let line = format!("{}: {}", entry.template, entry.finding.message);
        match entry.finding.severity {
            Severity::Warning => output.warning(&line)?,
            _ => output.info(&line)?,
        }
    }
    Ok(())
}

fn show_configuration(
    options: &ProjectOptions,
    project_dir: &std::path::Path,
    output: &OutputManager,
) -> CliResult<()> {
    output.header("New project")?;
    output.print(&format!("  Name:         {}", options.name()))?;
    output.print(&format!("  Directory:    {}", project_dir.display()))?;
    output.print(&format!("  Kind:         {}", options.kind()))?;
    output.print(&format!("  Architecture: {}", options.architecture()))?;
    output.print(&format!("  Database:     {}", options.database()))?;
    let features = options.features();
    output.print(&format!(
        "  Features:     container={} orchestration={} sample-module={}",
        features.container, features.orchestration, features.sample_module
    ))?;
    Ok(())
}

/// Plain stdin confirmation. Anything but `y`/`yes` declines.
fn confirm() -> CliResult<bool> {
    print!("Proceed? [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Arch, Database, Kind};
    use keel_core::domain::{Architecture, DatabaseProvider};

    fn option_args() -> OptionArgs {
        OptionArgs {
            kind: Kind::Api,
            architecture: Arch::Modular,
            database: Database::Sqlite,
            container: true,
            orchestration: false,
            sample_module: true,
        }
    }

    #[test]
    fn build_options_maps_all_flags() {
        let options = build_options("Order Hub", &option_args(), Some("/tmp/ws".into())).unwrap();
        assert_eq!(options.architecture(), Architecture::ModularMonolith);
        assert_eq!(options.database(), DatabaseProvider::Sqlite);
        assert!(options.features().container);
        assert!(!options.features().orchestration);
        assert!(options.features().sample_module);
        assert_eq!(options.output_root(), std::path::Path::new("/tmp/ws"));
    }

    #[test]
    fn build_options_rejects_invalid_name() {
        let result = build_options("../escape", &option_args(), None);
        assert!(result.is_err());
    }
}
