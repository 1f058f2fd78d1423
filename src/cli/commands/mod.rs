//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which discovers the
//! [`Project`](crate::toolset::Project) once and routes CLI subcommands to
//! their implementations.

pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod install;
pub mod ls;
pub mod run;
pub mod settings;
pub mod tasks;
pub mod uninstall;
pub mod up;
pub mod use_tool;
pub mod where_tool;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
