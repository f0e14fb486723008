//! Implementation of the `keel completions` command.

use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, CompletionsArgs, Shell};
use crate::error::CliResult;

/// Write a completion script for the requested shell to stdout.
pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    let mut stdout = std::io::stdout();

    match args.shell {
        Shell::Bash => generate(clap_complete::shells::Bash, &mut cmd, bin_name, &mut stdout),
        Shell::Zsh => generate(clap_complete::shells::Zsh, &mut cmd, bin_name, &mut stdout),
        Shell::Fish => generate(clap_complete::shells::Fish, &mut cmd, bin_name, &mut stdout),
        Shell::PowerShell => generate(
            clap_complete::shells::PowerShell,
            &mut cmd,
            bin_name,
            &mut stdout,
        ),
        Shell::Elvish => generate(
            clap_complete::shells::Elvish,
            &mut cmd,
            bin_name,
            &mut stdout,
        ),
    }

    Ok(())
}
