//! Lockfile handling.
//!
//! The lockfile records the concrete version each tool last resolved to. It
//! sits next to the config file that declares the tools and shares its stem:
//! `toolpin.toml` pins into `toolpin.lock`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ToolpinError};

/// Lockfile contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lockfile {
    /// Tool name to pinned concrete version.
    #[serde(default)]
    pub tools: BTreeMap<String, String>,
}

impl Lockfile {
    /// Lockfile path for a config file.
    pub fn path_for(config_path: &Path) -> PathBuf {
        config_path.with_extension("lock")
    }

    /// Parse from TOML.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| ToolpinError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ToolpinError::Other(e.into()))
    }

    /// Load a lockfile. A missing file is an empty lockfile.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Save atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let temp_path = path.with_extension("lock.tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Pinned version of a tool.
    pub fn get(&self, tool: &str) -> Option<&str> {
        self.tools.get(tool).map(String::as_str)
    }

    /// Pin a tool, returning the previous pin.
    pub fn set(&mut self, tool: &str, version: &str) -> Option<String> {
        self.tools.insert(tool.to_string(), version.to_string())
    }

    /// Drop a tool's pin.
    pub fn remove(&mut self, tool: &str) -> Option<String> {
        self.tools.remove(tool)
    }
}
