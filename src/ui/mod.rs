//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] writing data to stdout and status to stderr
//! - [`MockUI`] capturing output for tests
//!
//! # Example
//!
//! ```
//! use toolpin::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("tiny 1.0.0");
//! ui.success("Installed tiny@1.0.0");
//! assert!(ui.has_message("tiny"));
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ToolpinTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Write command data (listings, values) to standard output.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display extra detail, shown only in verbose mode.
    fn detail(&mut self, msg: &str);
}
