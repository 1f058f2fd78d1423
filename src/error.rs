//! Error types for toolpin operations.
//!
//! This module defines [`ToolpinError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ToolpinError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `ToolpinError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for toolpin operations.
#[derive(Debug, Error)]
pub enum ToolpinError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// No platform directory and no override to fall back on.
    #[error("Could not determine the {kind} directory; set {var}")]
    DirectoryNotFound {
        kind: &'static str,
        var: &'static str,
    },

    /// Failed to parse a config, lockfile, or install record.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// No installed version satisfies the requested specifier.
    #[error("No installed version of {tool} matches '{specifier}'")]
    VersionNotFound { tool: String, specifier: String },

    /// The tool has no installed versions at all.
    #[error("No versions of {tool} are installed")]
    NoVersionsInstalled { tool: String },

    /// A `tool@version` argument could not be parsed.
    #[error("Invalid tool request '{input}': {message}")]
    InvalidToolRequest { input: String, message: String },

    /// The tool is not declared in any config file.
    #[error("{tool} is not configured in this project")]
    ToolNotConfigured { tool: String },

    /// Setting key is not recognised.
    #[error("Unknown setting: {key}")]
    UnknownSetting { key: String },

    /// Setting value has the wrong type.
    #[error("Invalid value for setting {key}: {value}")]
    InvalidSettingValue { key: String, value: String },

    /// Referenced task does not exist.
    #[error("Unknown task: {name}")]
    UnknownTask { name: String },

    /// A task's run template could not be parsed.
    #[error("Invalid template in task '{task}': {message}")]
    TemplateError { task: String, message: String },

    /// An `arg()` placeholder had no value and no default.
    #[error("Task '{task}' requires argument #{position}")]
    MissingTaskArgument { task: String, position: usize },

    /// Task arguments did not match the task's placeholders.
    #[error("Invalid arguments for task '{task}': {message}")]
    InvalidTaskArguments { task: String, message: String },

    /// Task dependency cycle detected.
    #[error("Circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    /// Shell command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for toolpin operations.
pub type Result<T> = std::result::Result<T, ToolpinError>;
