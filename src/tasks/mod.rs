//! Project tasks with placeholder templates.
//!
//! A task's `run` lines are parsed as [`Template`]s, the user's arguments are
//! split into an [`Invocation`] using the flag and option names the templates
//! declare, and [`render`] produces the final command lines that
//! [`TaskRunner`] executes through the shell.

pub mod invocation;
pub mod render;
pub mod runner;
pub mod template;

pub use invocation::{Declared, Invocation};
pub use render::{render, shell_quote, RenderContext, RenderError};
pub use runner::{PreparedCommand, TaskRunner};
pub use template::{ArgRef, FlagRef, Node, OptionRef, ParseError, Template};
