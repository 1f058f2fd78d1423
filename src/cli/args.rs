//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Toolpin - per-project tool versions and tasks.
#[derive(Debug, Parser)]
#[command(name = "toolpin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides discovery from the current directory)
    #[arg(short = 'C', long, global = true, env = "TOOLPIN_PROJECT")]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install tool versions (all declared tools when none are given)
    #[command(alias = "i")]
    Install(InstallArgs),

    /// Remove an installed tool version
    #[command(alias = "rm")]
    Uninstall(UninstallArgs),

    /// Request a tool version for this project and pin it
    #[command(alias = "u")]
    Use(UseArgs),

    /// Re-resolve tool versions and update pins
    #[command(alias = "upgrade")]
    Up(UpArgs),

    /// List tools and their versions
    #[command(alias = "list")]
    Ls(LsArgs),

    /// Print the install directory of a tool version
    Where(WhereArgs),

    /// Read and write config files
    Config(ConfigArgs),

    /// Read and write settings
    Settings(SettingsArgs),

    /// Run a task
    #[command(alias = "r")]
    Run(RunArgs),

    /// Inspect tasks
    Tasks(TasksArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Tools to install, as `tool` or `tool@version`
    #[arg(value_name = "TOOL[@VERSION]")]
    pub tools: Vec<String>,
}

/// Arguments for the `uninstall` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UninstallArgs {
    /// Versions to remove, as `tool@version`
    #[arg(value_name = "TOOL@VERSION", required = true)]
    pub tools: Vec<String>,
}

/// Arguments for the `use` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UseArgs {
    /// Tools to use, as `tool@specifier`
    #[arg(value_name = "TOOL@VERSION", required = true)]
    pub tools: Vec<String>,

    /// Write to the global config instead of the project config
    #[arg(short, long)]
    pub global: bool,
}

/// Arguments for the `up` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UpArgs {
    /// Tools to upgrade (all declared tools when none are given)
    pub tools: Vec<String>,

    /// Move to the newest installed version and rewrite the specifier
    #[arg(long)]
    pub bump: bool,
}

/// Arguments for the `ls` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LsArgs {
    /// Only show this tool
    pub tool: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Only show versions used by this project
    #[arg(short, long)]
    pub current: bool,
}

/// Arguments for the `where` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct WhereArgs {
    /// Tool, optionally with a version
    #[arg(value_name = "TOOL[@VERSION]")]
    pub tool: String,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// `config` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Print a value by dotted key
    Get {
        /// Dotted key, e.g. `tools.node`
        key: String,

        /// Config file to read (defaults to the project config)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Set a value by dotted key
    Set {
        /// Dotted key, e.g. `tools.node`
        key: String,

        /// Value, parsed as TOML when possible
        value: String,

        /// Config file to write (defaults to the project config)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List config files in merge order
    Ls,
}

/// Arguments for the `settings` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: Option<SettingsAction>,
}

/// `settings` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum SettingsAction {
    /// List settings and their effective values
    Ls,

    /// Print one setting
    Get { key: String },

    /// Store a setting in the global config
    Set { key: String, value: String },

    /// Remove a setting from the global config
    Unset { key: String },
}

/// Arguments for the `run` command.
///
/// Everything after the task name belongs to the task, including `--` and
/// words that look like toolpin's own flags, so the task name and its
/// arguments are captured as one raw list.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Task to run, followed by the arguments passed to it
    #[arg(
        value_name = "TASK [ARGS]",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl RunArgs {
    /// Build arguments for a task invocation.
    pub fn new(task: &str, args: &[&str]) -> Self {
        let mut command = vec![task.to_string()];
        command.extend(args.iter().map(|a| a.to_string()));
        Self { command }
    }

    /// Name of the task to run.
    pub fn task(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or_default()
    }

    /// Arguments for the task, exactly as given.
    pub fn args(&self) -> &[String] {
        self.command.get(1..).unwrap_or_default()
    }
}

/// Arguments for the `tasks` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TasksArgs {
    #[command(subcommand)]
    pub action: Option<TasksAction>,
}

/// `tasks` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum TasksAction {
    /// List tasks
    Ls,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
