//! Implementation of the `keel plan` command.
//!
//! Prints the file set a configuration would generate, without rendering
//! or writing anything.

use tracing::instrument;

use keel_core::domain::GenerationPlan;

use crate::{
    cli::{GlobalArgs, PlanArgs, PlanFormat},
    error::CliResult,
    output::OutputManager,
};

/// Execute the `keel plan` command.
#[instrument(skip_all)]
pub fn execute(args: PlanArgs, _global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let options = super::new::build_options(&args.name, &args.options, None)?;
    let plan = GenerationPlan::for_options(&options);

    match args.format {
        PlanFormat::List => {
            for file in plan.files() {
                output.print(&file.path.to_string())?;
            }
        }
        PlanFormat::Table => {
            output.header(&format!(
                "{} files for {} ({}, {}, {})",
                plan.len(),
                options.name(),
                options.kind(),
                options.architecture(),
                options.database(),
            ))?;
            for file in plan.files() {
                let marker = if file.required { " " } else { "?" };
                output.print(&format!("  {marker} {:<18} {}", file.id.to_string(), file.path))?;
            }
            if plan.files().iter().any(|f| !f.required) {
                output.print("")?;
                output.print("  ? = optional file; findings in it never abort generation")?;
            }
        }
        PlanFormat::Json => {
            let rows: Vec<_> = plan
                .files()
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "id": f.id.as_str(),
                        "path": f.path.as_str(),
                        "required": f.required,
                    })
                })
                .collect();
            output.print(&serde_json::to_string_pretty(&rows).unwrap_or_default())?;
        }
    }

    Ok(())
}
