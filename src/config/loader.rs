//! Configuration file discovery and loading.
//!
//! This module handles finding config files and merging the tools and tasks
//! they declare in the correct priority order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, ToolpinError};

use super::file::ConfigFile;
use super::schema::TaskConfig;

/// Project config file names, in lookup order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["toolpin.toml", ".toolpin.toml"];

/// Project-local override file name.
pub const LOCAL_CONFIG_NAME: &str = "toolpin.local.toml";

/// Directory for installed versions and other data.
///
/// `TOOLPIN_DATA_DIR` overrides the platform default.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("TOOLPIN_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    platform_dir(dirs::data_local_dir(), "data", "TOOLPIN_DATA_DIR")
}

/// Path of the global config file.
///
/// `TOOLPIN_GLOBAL_CONFIG_FILE` overrides the platform default.
pub fn global_config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os("TOOLPIN_GLOBAL_CONFIG_FILE") {
        return Ok(PathBuf::from(path));
    }
    let dir = platform_dir(dirs::config_dir(), "config", "TOOLPIN_GLOBAL_CONFIG_FILE")?;
    Ok(dir.join("config.toml"))
}

/// `base/toolpin`, or an error naming the override when `dirs` found no base.
fn platform_dir(base: Option<PathBuf>, kind: &'static str, var: &'static str) -> Result<PathBuf> {
    base.map(|dir| dir.join("toolpin"))
        .ok_or(ToolpinError::DirectoryNotFound { kind, var })
}

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. Global config (`~/.config/toolpin/config.toml`)
/// 2. Project config (`toolpin.toml` or `.toolpin.toml`)
/// 3. Local overrides (`toolpin.local.toml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Global config path (may not exist).
    pub global: PathBuf,

    /// Project config, if present.
    pub project: Option<PathBuf>,

    /// Local overrides, if present.
    pub project_local: Option<PathBuf>,

    /// Project root directory.
    pub root: PathBuf,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path, global: PathBuf) -> Self {
        let project = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| project_root.join(name))
            .find(|p| p.is_file());
        let local = project_root.join(LOCAL_CONFIG_NAME);

        Self {
            global,
            project,
            project_local: local.is_file().then_some(local),
            root: project_root.to_path_buf(),
        }
    }

    /// Project config path to write to, creating `toolpin.toml` if none exists.
    pub fn project_target(&self) -> PathBuf {
        self.project
            .clone()
            .unwrap_or_else(|| self.root.join(PROJECT_CONFIG_NAMES[0]))
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        let mut paths = Vec::new();
        if self.global.is_file() {
            paths.push(&self.global);
        }
        if let Some(p) = &self.project {
            paths.push(p);
        }
        if let Some(p) = &self.project_local {
            paths.push(p);
        }
        paths
    }
}

/// Find the project root by walking up from `start`.
///
/// The nearest directory holding a project config file wins.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if PROJECT_CONFIG_NAMES
            .iter()
            .chain(std::iter::once(&LOCAL_CONFIG_NAME))
            .any(|name| current.join(name).is_file())
        {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// A tool declared in some config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDeclaration {
    /// Tool name.
    pub tool: String,
    /// Requested specifier.
    pub specifier: String,
    /// File that declared it.
    pub source: PathBuf,
}

/// A task with the directory of the file that declared it.
#[derive(Debug, Clone)]
pub struct DeclaredTask {
    /// Task name.
    pub name: String,
    /// Task configuration.
    pub config: TaskConfig,
    /// Directory of the declaring config file.
    pub config_root: PathBuf,
}

/// All loaded config files, lowest priority first.
#[derive(Debug, Clone)]
pub struct ConfigLayers {
    files: Vec<ConfigFile>,
}

impl ConfigLayers {
    /// Load every existing file in `paths`.
    pub fn load(paths: &ConfigPaths) -> Result<Self> {
        let files = paths
            .all_existing()
            .into_iter()
            .map(|p| ConfigFile::load(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { files })
    }

    /// Loaded files in merge order.
    pub fn files(&self) -> &[ConfigFile] {
        &self.files
    }

    /// Merged tool declarations; higher-priority files win.
    pub fn tools(&self) -> Result<BTreeMap<String, ToolDeclaration>> {
        let mut tools = BTreeMap::new();
        for file in &self.files {
            for (name, spec) in file.typed()?.tools {
                tools.insert(
                    name.clone(),
                    ToolDeclaration {
                        tool: name,
                        specifier: spec.specifier().to_string(),
                        source: file.path().to_path_buf(),
                    },
                );
            }
        }
        Ok(tools)
    }

    /// The winning declaration for one tool.
    pub fn tool(&self, name: &str) -> Result<Option<ToolDeclaration>> {
        Ok(self.tools()?.remove(name))
    }

    /// Merged task declarations; higher-priority files win.
    pub fn tasks(&self) -> Result<BTreeMap<String, DeclaredTask>> {
        let mut tasks = BTreeMap::new();
        for file in &self.files {
            for (name, entry) in file.typed()?.tasks {
                tasks.insert(
                    name.clone(),
                    DeclaredTask {
                        name,
                        config: entry.into_config(),
                        config_root: file.root().to_path_buf(),
                    },
                );
            }
        }
        Ok(tasks)
    }
}
