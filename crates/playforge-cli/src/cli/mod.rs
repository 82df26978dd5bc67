//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, LogFormat, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "playforge",
    bin_name = "playforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Playbook-driven file generation",
    long_about = "Playforge asks the questions declared in a YAML playbook, \
                  validates the answers, and renders the playbook's templates \
                  into files.",
    after_help = "EXAMPLES:\n\
        \x20 playforge run playbooks/zone-record.yaml\n\
        \x20 playforge run playbooks/zone-record.yaml --append\n\
        \x20 playforge validate playbooks/zone-record.yaml\n\
        \x20 playforge completions bash > /usr/share/bash-completion/completions/playforge",
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
    /// Run a playbook: ask its questions and write its outputs.
    #[command(
        visible_alias = "r",
        about = "Run a playbook",
        after_help = "EXAMPLES:\n\
            \x20 playforge run zone-record.yaml\n\
            \x20 playforge run zone-record.yaml --overwrite\n\
            \x20 playforge run zone-record.yaml -a"
    )]
    Run(RunArgs),

    /// Check a playbook without asking anything.
    #[command(
        visible_alias = "check",
        about = "Validate a playbook",
        after_help = "EXAMPLES:\n\
            \x20 playforge validate zone-record.yaml\n\
            \x20 playforge validate zone-record.yaml --output-format json"
    )]
    Validate(ValidateArgs),

    /// Initialise a Playforge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 playforge init\n\
            \x20 playforge init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 playforge completions bash > ~/.local/share/bash-completion/completions/playforge\n\
            \x20 playforge completions zsh  > ~/.zfunc/_playforge\n\
            \x20 playforge completions fish > ~/.config/fish/completions/playforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Playforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 playforge config get run.append\n\
            \x20 playforge config list\n\
            \x20 playforge config path"
    )]
    Config(ConfigCommands),
}

// ── run ───────────────────────────────────────────────────────────────────────

/// Arguments for `playforge run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Playbook document to run.
    #[arg(value_name = "PLAYBOOK", help = "Path to the playbook YAML file")]
    pub playbook: PathBuf,

    /// Replace existing output files without asking.
    #[arg(
        short = 'o',
        long = "overwrite",
        help = "Overwrite existing output files without asking"
    )]
    pub overwrite: bool,

    /// Append to existing output files without asking.
    #[arg(
        short = 'a',
        long = "append",
        help = "Append to existing output files without asking"
    )]
    pub append: bool,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `playforge validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Playbook document to check.
    #[arg(value_name = "PLAYBOOK", help = "Path to the playbook YAML file")]
    pub playbook: PathBuf,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `playforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `playforge completions`.
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

/// Subcommands for `playforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `run.append`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
