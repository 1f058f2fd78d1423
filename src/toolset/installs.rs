//! The set of installed tool versions.
//!
//! Each installed version is a directory `<root>/<tool>/<version>/` holding
//! an install record. A directory without a record is treated as a partial
//! install and ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ToolpinError};

use super::version::Version;

/// File name of the record written into every install directory.
pub const INSTALL_RECORD: &str = ".toolpin-install.yml";

/// Metadata written when a version is installed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallRecord {
    /// Tool name.
    pub tool: String,
    /// Concrete version.
    pub version: String,
    /// When the version was installed.
    pub installed_at: DateTime<Utc>,
}

/// Outcome of an install request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The version was newly installed.
    Installed,
    /// The version was already present.
    AlreadyInstalled,
}

/// Filesystem-backed store of installed versions.
#[derive(Debug, Clone)]
pub struct InstallStore {
    root: PathBuf,
}

impl InstallStore {
    /// Create a store rooted at `root` (usually `<data_dir>/installs`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory a version is (or would be) installed into.
    pub fn install_path(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(version)
    }

    /// Check whether a version is installed.
    pub fn is_installed(&self, tool: &str, version: &str) -> bool {
        self.install_path(tool, version).join(INSTALL_RECORD).is_file()
    }

    /// List installed versions of a tool in ascending order.
    pub fn list(&self, tool: &str) -> Result<Vec<Version>> {
        let dir = self.root.join(tool);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut versions = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.path().join(INSTALL_RECORD).is_file() {
                continue;
            }
            let name = entry.file_name();
            if let Some(version) = name.to_str().and_then(Version::parse) {
                versions.push(version);
            }
        }
        versions.sort();
        Ok(versions)
    }

    /// Names of tools with at least one directory in the store, sorted.
    pub fn tools(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut tools = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    tools.push(name.to_string());
                }
            }
        }
        tools.sort();
        Ok(tools)
    }

    /// Install an exact version.
    pub fn install(&self, tool: &str, version: &str) -> Result<InstallOutcome> {
        validate_version_dir(tool, version)?;
        if self.is_installed(tool, version) {
            tracing::debug!("{}@{} already installed", tool, version);
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        let dir = self.install_path(tool, version);
        fs::create_dir_all(&dir)?;

        let record = InstallRecord {
            tool: tool.to_string(),
            version: version.to_string(),
            installed_at: Utc::now(),
        };
        let content = serde_yaml::to_string(&record).map_err(|e| ToolpinError::Other(e.into()))?;

        // Write the record last so a crash leaves an ignored partial install.
        let path = dir.join(INSTALL_RECORD);
        let temp_path = path.with_extension("yml.tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("installed {}@{} into {}", tool, version, dir.display());
        Ok(InstallOutcome::Installed)
    }

    /// Remove an installed version. Returns false if it was not installed.
    pub fn uninstall(&self, tool: &str, version: &str) -> Result<bool> {
        validate_version_dir(tool, version)?;
        let dir = self.install_path(tool, version);
        if !dir.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(&dir)?;
        tracing::debug!("removed {}", dir.display());
        Ok(true)
    }
}

fn validate_version_dir(tool: &str, version: &str) -> Result<()> {
    let bad = version.is_empty()
        || version == "."
        || version == ".."
        || version.contains(['/', '\\'])
        || version == super::version::LATEST;
    if bad {
        return Err(ToolpinError::InvalidToolRequest {
            input: format!("{}@{}", tool, version),
            message: "not an installable version".to_string(),
        });
    }
    Ok(())
}
