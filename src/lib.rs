//! toolpin - per-project tool versions and task running.
//!
//! toolpin reads `toolpin.toml` files, resolves fuzzy version specifiers
//! against locally installed tool versions, pins the results in a lockfile,
//! and runs project tasks whose commands are templates filled in from
//! command-line arguments.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration files, layering, and settings
//! - [`error`] - Error types and result aliases
//! - [`shell`] - Shell command execution
//! - [`tasks`] - Task templates, argument parsing, and the task runner
//! - [`toolset`] - Versions, the install store, resolution, and lockfiles
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use toolpin::tasks::{render, Declared, Invocation, RenderContext, Template};
//! use std::collections::BTreeMap;
//! use std::path::Path;
//!
//! let template = Template::parse("echo {{arg()}}").unwrap();
//! let args = vec!["hello world".to_string()];
//! let invocation = Invocation::parse(&args, &Declared::default()).unwrap();
//! let env = BTreeMap::new();
//! let ctx = RenderContext {
//!     invocation: &invocation,
//!     env: &env,
//!     config_root: Path::new("."),
//!     append_unused: false,
//! };
//! assert_eq!(render(&template, &ctx).unwrap(), "echo 'hello world'");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod shell;
pub mod tasks;
pub mod toolset;
pub mod ui;

pub use error::{Result, ToolpinError};
