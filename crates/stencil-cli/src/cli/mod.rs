//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Stamp out API workspaces from template trees",
    long_about = "Stencil copies template trees, replaces the __APP_NAME__ \
                  placeholder with your project name, and chains the API and \
                  infra units into one ready-to-run workspace.",
    after_help = "EXAMPLES:\n\
        \x20 stencil new shop\n\
        \x20 stencil new shop ~/code\n\
        \x20 stencil api billing\n\
        \x20 stencil infra shop ./shop\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
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
    /// Compose a full API workspace.
    #[command(
        visible_alias = "n",
        about = "Create a new API workspace (API crate + infra + workspace files)",
        after_help = "EXAMPLES:\n\
            \x20 stencil new shop          # creates ./shop\n\
            \x20 stencil new shop ~/code   # creates ~/code/shop"
    )]
    New(ProjectArgs),

    /// Run the API unit on its own.
    #[command(
        about = "Create a standalone API crate",
        after_help = "EXAMPLES:\n\
            \x20 stencil api billing\n\
            \x20 stencil api billing ./services"
    )]
    Api(ProjectArgs),

    /// Run the infra unit on its own.
    #[command(
        about = "Write docker compose files for a project",
        after_help = "EXAMPLES:\n\
            \x20 stencil infra shop          # writes ./infra/...\n\
            \x20 stencil infra shop ./shop   # writes ./shop/infra/..."
    )]
    Infra(ProjectArgs),

    /// List the scaffolder units and where they come from.
    #[command(
        visible_alias = "ls",
        about = "List scaffolder units",
        after_help = "EXAMPLES:\n\
            \x20 stencil list\n\
            \x20 stencil list --format json"
    )]
    List(ListArgs),

    /// Initialise a Stencil configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stencil init           # default location\n\
            \x20 stencil init --force   # overwrite existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stencil configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config get templates.placeholder\n\
            \x20 stencil config list\n\
            \x20 stencil config path"
    )]
    Config(ConfigCommands),
}

// ── new / api / infra ─────────────────────────────────────────────────────────

/// Arguments shared by `new`, `api` and `infra`.
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Project name: lowercase letters, digits and `_`, starting with a letter.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Destination base directory.
    #[arg(
        value_name = "DEST",
        help = "Destination directory (default: current directory)"
    )]
    pub dest: Option<PathBuf>,
}

impl ProjectArgs {
    /// Destination base, defaulting to the current directory.
    pub fn dest_base(&self) -> PathBuf {
        self.dest.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One unit label per line.
    Plain,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
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

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `templates.placeholder`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
