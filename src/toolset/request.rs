//! Parsing of `tool@specifier` command-line arguments.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, ToolpinError};

/// A tool name with an optional version specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequest {
    /// Tool name (e.g. `node`).
    pub tool: String,
    /// Requested version or prefix (e.g. `20`, `1.0.1`, `latest`).
    pub specifier: Option<String>,
}

static TOOL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.\-]*$").expect("tool name pattern is valid")
});

impl ToolRequest {
    /// Parse `tool` or `tool@specifier`.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |message: &str| ToolpinError::InvalidToolRequest {
            input: input.to_string(),
            message: message.to_string(),
        };

        let (tool, specifier) = match input.split_once('@') {
            Some((tool, spec)) => {
                let spec = spec.trim();
                if spec.is_empty() {
                    return Err(invalid("missing version after '@'"));
                }
                (tool.trim(), Some(spec.to_string()))
            }
            None => (input.trim(), None),
        };

        if tool.is_empty() {
            return Err(invalid("missing tool name"));
        }
        if !TOOL_NAME.is_match(tool) {
            return Err(invalid("tool names may only contain letters, digits, '.', '_' and '-'"));
        }

        Ok(Self {
            tool: tool.to_string(),
            specifier,
        })
    }

    /// Return the specifier, failing if none was given.
    pub fn require_specifier(&self) -> Result<&str> {
        self.specifier
            .as_deref()
            .ok_or_else(|| ToolpinError::InvalidToolRequest {
                input: self.tool.clone(),
                message: "a version is required (use tool@version)".to_string(),
            })
    }
}

impl FromStr for ToolRequest {
    type Err = ToolpinError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ToolRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.specifier {
            Some(spec) => write!(f, "{}@{}", self.tool, spec),
            None => f.write_str(&self.tool),
        }
    }
}
