//! Read-modify-write access to a single TOML config file.
//!
//! Callers load a [`ConfigFile`], mutate it, and [`save`](ConfigFile::save)
//! it. The document is kept as a raw table so keys this crate doesn't know
//! about are written back unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::{Result, ToolpinError};

use super::schema::ToolpinConfig;

/// A config file and its parsed document.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    doc: Table,
}

impl ConfigFile {
    /// Load a config file. A missing file yields an empty document.
    pub fn load(path: &Path) -> Result<Self> {
        let doc = match fs::read_to_string(path) {
            Ok(content) => parse_table(&content, path)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Table::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    /// Load a config file that must exist.
    pub fn load_existing(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ToolpinError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        Self::load(path)
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the file.
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Raw document.
    pub fn document(&self) -> &Table {
        &self.doc
    }

    /// Typed view of the document.
    pub fn typed(&self) -> Result<ToolpinConfig> {
        Value::Table(self.doc.clone())
            .try_into::<ToolpinConfig>()
            .map_err(|e: toml::de::Error| ToolpinError::ConfigParseError {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }

    /// Write the document atomically.
    pub fn save(&self) -> Result<()> {
        let content = toml::to_string(&self.doc).map_err(|e| ToolpinError::Other(e.into()))?;
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;
        tracing::debug!("wrote {}", self.path.display());
        Ok(())
    }

    /// Requested specifier for a tool.
    pub fn tool(&self, name: &str) -> Option<&str> {
        match self.doc.get("tools")?.get(name)? {
            Value::String(spec) => Some(spec.as_str()),
            Value::Table(t) => t.get("version")?.as_str(),
            _ => None,
        }
    }

    /// Set a tool's requested specifier, keeping the table form if present.
    pub fn set_tool(&mut self, name: &str, specifier: &str) -> Result<()> {
        let tools = self.table_mut("tools")?;
        match tools.get_mut(name) {
            Some(Value::Table(t)) => {
                t.insert("version".to_string(), Value::String(specifier.to_string()));
            }
            _ => {
                tools.insert(name.to_string(), Value::String(specifier.to_string()));
            }
        }
        Ok(())
    }

    /// Look up a dotted key such as `tools.tiny`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let mut current = self.doc.get(parts.next()?)?;
        for part in parts {
            current = current.as_table()?.get(part)?;
        }
        Some(current)
    }

    /// Set a dotted key, creating intermediate tables.
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let (parents, leaf) = split_key(key)?;
        let mut table = &mut self.doc;
        for part in parents {
            table = child_table(table, part, key)?;
        }
        table.insert(leaf.to_string(), value);
        Ok(())
    }

    /// Remove a dotted key. Returns the removed value.
    pub fn remove(&mut self, key: &str) -> Result<Option<Value>> {
        let (parents, leaf) = split_key(key)?;
        if !parents.is_empty() && !self.get(&parents.join(".")).is_some_and(Value::is_table) {
            return Ok(None);
        }
        let mut table = &mut self.doc;
        for part in parents {
            table = child_table(table, part, key)?;
        }
        Ok(table.remove(leaf))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        let path = self.path.clone();
        child_table(&mut self.doc, name, name).map_err(|_| ToolpinError::ConfigValidationError {
            message: format!("'{}' in {} is not a table", name, path.display()),
        })
    }
}

fn parse_table(content: &str, path: &Path) -> Result<Table> {
    content
        .parse::<Table>()
        .map_err(|e| ToolpinError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

fn split_key(key: &str) -> Result<(Vec<&str>, &str)> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(ToolpinError::ConfigValidationError {
            message: format!("invalid key '{}'", key),
        });
    }
    let (leaf, parents) = parts
        .split_last()
        .ok_or_else(|| ToolpinError::ConfigValidationError {
            message: "empty key".to_string(),
        })?;
    Ok((parents.to_vec(), leaf))
}

fn child_table<'a>(table: &'a mut Table, name: &str, key: &str) -> Result<&'a mut Table> {
    let entry = table
        .entry(name.to_string())
        .or_insert_with(|| Value::Table(Table::new()));
    match entry {
        Value::Table(t) => Ok(t),
        _ => Err(ToolpinError::ConfigValidationError {
            message: format!("cannot set '{}': '{}' is not a table", key, name),
        }),
    }
}

/// Render a value for display: strings bare, everything else as TOML.
pub fn display_value(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Table(t) => toml::to_string(t)
            .map(|s| s.trim_end().to_string())
            .map_err(|e| ToolpinError::Other(e.into())),
        other => Ok(other.to_string()),
    }
}

/// Parse a command-line value: TOML literal if it parses, else a string.
pub fn parse_value(raw: &str) -> Value {
    let wrapped = format!("v = {}", raw);
    wrapped
        .parse::<Table>()
        .ok()
        .and_then(|mut t| t.remove("v"))
        .unwrap_or_else(|| Value::String(raw.to_string()))
}
