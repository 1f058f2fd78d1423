//! Shell command execution.

pub mod command;

pub use command::{execute, task_shell, CommandOptions, CommandResult};
