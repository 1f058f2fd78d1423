//! Configuration loading, persistence, and settings for toolpin.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - Read-modify-write file access in [`file`]
//! - File discovery and layering in [`loader`]
//! - User settings and environment toggles in [`settings`]
//!
//! # Example
//!
//! ```
//! use toolpin::config::ConfigFile;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("toolpin.toml");
//!
//! let mut file = ConfigFile::load(&path).unwrap();
//! file.set_tool("node", "20").unwrap();
//! file.save().unwrap();
//!
//! assert_eq!(ConfigFile::load(&path).unwrap().tool("node"), Some("20"));
//! ```
//!
//! # Configuration File Locations
//!
//! toolpin discovers and merges configuration in this order:
//! 1. Global config (`~/.config/toolpin/config.toml`)
//! 2. Project config (`toolpin.toml` or `.toolpin.toml`)
//! 3. Local overrides (`toolpin.local.toml`)

pub mod file;
pub mod loader;
pub mod schema;
pub mod settings;

pub use file::{display_value, parse_value, ConfigFile};
pub use loader::{
    data_dir, find_project_root, global_config_path, ConfigLayers, ConfigPaths, DeclaredTask,
    ToolDeclaration, LOCAL_CONFIG_NAME, PROJECT_CONFIG_NAMES,
};
pub use schema::{RunSpec, TaskConfig, TaskEntry, ToolSpec, ToolpinConfig};
pub use settings::{parse_bool, parse_setting, Settings, SETTING_KEYS};
