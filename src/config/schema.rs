//! Configuration schema types.
//!
//! These types are deserialized from `toolpin.toml` files. Writes go through
//! [`ConfigFile`](super::ConfigFile) instead so unknown keys survive a
//! read-modify-write cycle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Typed view of one config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolpinConfig {
    /// Tool name to requested version.
    #[serde(default)]
    pub tools: BTreeMap<String, ToolSpec>,

    /// Named tasks.
    #[serde(default)]
    pub tasks: BTreeMap<String, TaskEntry>,
}

/// A tool's requested version, either `"1"` or `{ version = "1" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolSpec {
    /// Bare specifier string.
    Version(String),
    /// Table form.
    Detailed { version: String },
}

impl ToolSpec {
    /// The requested specifier.
    pub fn specifier(&self) -> &str {
        match self {
            Self::Version(v) => v,
            Self::Detailed { version } => version,
        }
    }
}

/// A task declaration, either a bare command or a full table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskEntry {
    /// `build = "cargo build"`
    Command(String),
    /// `[tasks.build]` with fields.
    Full(TaskConfig),
}

impl TaskEntry {
    /// Normalise into a full task config.
    pub fn into_config(self) -> TaskConfig {
        match self {
            Self::Command(run) => TaskConfig {
                run: RunSpec::One(run),
                ..Default::default()
            },
            Self::Full(config) => config,
        }
    }
}

/// Full task configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Command template(s) to run.
    #[serde(default)]
    pub run: RunSpec,

    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,

    /// Working directory, relative to the config file's directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Extra environment variables.
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Tasks to run first.
    #[serde(default)]
    pub depends: Vec<String>,
}

/// One command or a list of commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunSpec {
    One(String),
    Many(Vec<String>),
}

impl Default for RunSpec {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl RunSpec {
    /// Commands in execution order.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::One(line) => vec![line.as_str()],
            Self::Many(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}
