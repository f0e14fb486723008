//! Command handlers. Each submodule owns exactly one subcommand.

pub mod completions;
pub mod new;
pub mod plan;
pub mod upgrade;
