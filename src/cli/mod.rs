//! Command-line interface for toolpin.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, CompletionsArgs, ConfigAction, ConfigArgs, InstallArgs, LsArgs, RunArgs,
    SettingsAction, SettingsArgs, TasksAction, TasksArgs, UninstallArgs, UpArgs, UseArgs,
    WhereArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
