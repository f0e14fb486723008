//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names,
//! aliases, help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "keel",
    bin_name = "keel",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2693} Declarative scaffolding for Rust services",
    long_about = "Keel generates production-ready Rust service workspaces \
                  from a declarative set of project options, and diffs \
                  dependency manifests for its upgrade workflow.",
    after_help = "EXAMPLES:\n\
        \x20 keel new order-hub --database postgres --container\n\
        \x20 keel new order-hub --arch modular --kind fullstack --sample-module\n\
        \x20 keel plan --arch microservices --orchestration\n\
        \x20 keel upgrade --current Cargo.toml --latest /tmp/latest/Cargo.toml\n\
        \x20 keel completions bash > /usr/share/bash-completion/completions/keel",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from the built-in templates.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 keel new order-hub --database postgres\n\
            \x20 keel new order-hub --arch modular --container --orchestration\n\
            \x20 keel new order-hub --kind fullstack --sample-module"
    )]
    New(NewArgs),

    /// Show the files a configuration would generate.
    #[command(
        visible_alias = "p",
        about = "Show the generation plan",
        after_help = "EXAMPLES:\n\
            \x20 keel plan --arch microservices\n\
            \x20 keel plan --database sqlite --container --format json"
    )]
    Plan(PlanArgs),

    /// Compare two dependency manifests.
    #[command(
        visible_alias = "up",
        about = "Diff dependency manifests for an upgrade",
        after_help = "EXAMPLES:\n\
            \x20 keel upgrade --current Cargo.toml --latest /tmp/next/Cargo.toml\n\
            \x20 keel upgrade --current Cargo.toml --latest next.toml --tag v0.4.0"
    )]
    Upgrade(UpgradeArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 keel completions bash > ~/.local/share/bash-completion/completions/keel\n\
            \x20 keel completions zsh  > ~/.zfunc/_keel\n\
            \x20 keel completions fish > ~/.config/fish/completions/keel.fish"
    )]
    Completions(CompletionsArgs),
}

// ── shared option args ────────────────────────────────────────────────────────

/// Project options shared by `new` and `plan`.
#[derive(Debug, Args)]
pub struct OptionArgs {
    /// Project kind.
    #[arg(
        short = 'k',
        long = "kind",
        value_name = "KIND",
        value_enum,
        default_value = "api",
        help = "Project kind"
    )]
    pub kind: Kind,

    /// Architecture style.
    #[arg(
        short = 'a',
        long = "arch",
        value_name = "ARCH",
        value_enum,
        default_value = "monolith",
        help = "Architecture style"
    )]
    pub architecture: Arch,

    /// Database provider.
    #[arg(
        short = 'd',
        long = "database",
        value_name = "DB",
        value_enum,
        default_value = "postgres",
        help = "Database provider"
    )]
    pub database: Database,

    /// Generate a Dockerfile.
    #[arg(long = "container", help = "Include a container build definition")]
    pub container: bool,

    /// Generate a compose orchestration manifest.
    #[arg(long = "orchestration", help = "Include a compose manifest")]
    pub orchestration: bool,

    /// Generate a sample module crate.
    #[arg(long = "sample-module", help = "Include a sample module crate")]
    pub sample_module: bool,
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `keel new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name. The project directory is the kebab-cased name under
    /// the output root.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Output directory the project folder is created in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── plan ──────────────────────────────────────────────────────────────────────

/// Arguments for `keel plan`.
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Project name used for paths in the plan.
    #[arg(
        value_name = "NAME",
        default_value = "my-service",
        help = "Project name used in the plan"
    )]
    pub name: String,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: PlanFormat,
}

/// Output format for the `plan` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PlanFormat {
    /// Human-readable table.
    Table,
    /// One path per line.
    List,
    /// JSON array.
    Json,
}

// ── upgrade ───────────────────────────────────────────────────────────────────

/// Arguments for `keel upgrade`.
#[derive(Debug, Args)]
pub struct UpgradeArgs {
    /// Manifest currently in use.
    #[arg(long = "current", value_name = "FILE", help = "Current manifest path")]
    pub current: PathBuf,

    /// Manifest of the release being considered.
    #[arg(long = "latest", value_name = "FILE", help = "Latest manifest path")]
    pub latest: PathBuf,

    /// Version tag of the release being considered.
    #[arg(long = "tag", value_name = "TAG", help = "Release tag")]
    pub tag: Option<String>,

    /// Mark the release as a pre-release.
    #[arg(long = "prerelease", help = "The release is a pre-release")]
    pub prerelease: bool,

    /// Emit the report as JSON.
    #[arg(long = "json", help = "Emit the report as JSON")]
    pub json: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `keel completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Supported project kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Kind {
    Api,
    #[value(alias = "full-stack")]
    Fullstack,
}

/// Supported architecture styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Arch {
    Monolith,
    #[value(name = "modular", alias = "modular-monolith")]
    Modular,
    #[value(name = "microservices", alias = "micro")]
    Microservices,
}

/// Supported database providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Database {
    #[value(alias = "postgresql", alias = "pg")]
    Postgres,
    Mysql,
    Sqlite,
    #[value(alias = "sqlserver")]
    Mssql,
}

// ── CLI → core conversions ────────────────────────────────────────────────────

impl From<Kind> for keel_core::domain::ProjectKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Api => Self::Api,
            Kind::Fullstack => Self::Fullstack,
        }
    }
}

impl From<Arch> for keel_core::domain::Architecture {
    fn from(arch: Arch) -> Self {
        match arch {
            Arch::Monolith => Self::Monolith,
            Arch::Modular => Self::ModularMonolith,
            Arch::Microservices => Self::Microservices,
        }
    }
}

impl From<Database> for keel_core::domain::DatabaseProvider {
    fn from(db: Database) -> Self {
        match db {
            Database::Postgres => Self::Postgres,
            Database::Mysql => Self::MySql,
            Database::Sqlite => Self::Sqlite,
            Database::Mssql => Self::Mssql,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
