//! User settings.
//!
//! Settings live in the `[settings]` table of the global config file and can
//! be overridden per process with `TOOLPIN_*` environment variables.

use serde::Serialize;
use toml::Value;

use crate::error::{Result, ToolpinError};

use super::file::ConfigFile;

/// Known setting keys.
pub const SETTING_KEYS: &[&str] = &["experimental", "lockfile", "verbose"];

/// Resolved settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Enable experimental features.
    pub experimental: bool,
    /// Maintain lockfiles (requires `experimental`).
    pub lockfile: bool,
    /// Verbose output by default.
    pub verbose: bool,
}

impl Settings {
    /// Load settings from the global config file and the process environment.
    pub fn load(global: &ConfigFile) -> Result<Self> {
        let mut settings = Self::from_file(global)?;
        settings.apply_env(std::env::vars());
        Ok(settings)
    }

    /// Read only the `[settings]` table of a config file.
    pub fn from_file(file: &ConfigFile) -> Result<Self> {
        let mut settings = Self::default();
        let Some(table) = file.get("settings").and_then(Value::as_table) else {
            return Ok(settings);
        };
        for (key, value) in table {
            let Some(flag) = value.as_bool() else {
                if SETTING_KEYS.contains(&key.as_str()) {
                    return Err(ToolpinError::InvalidSettingValue {
                        key: key.clone(),
                        value: value.to_string(),
                    });
                }
                continue;
            };
            if settings.set(key, flag).is_err() {
                tracing::debug!("ignoring unknown setting '{}' in {}", key, file.path().display());
            }
        }
        Ok(settings)
    }

    /// Apply `TOOLPIN_<KEY>` overrides.
    pub fn apply_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(key) = name.strip_prefix("TOOLPIN_") else {
                continue;
            };
            let key = key.to_lowercase();
            if !SETTING_KEYS.contains(&key.as_str()) {
                continue;
            }
            match parse_bool(&value) {
                Some(flag) => {
                    // Key was checked against SETTING_KEYS above.
                    let _ = self.set(&key, flag);
                }
                None => tracing::warn!("ignoring {}={}: expected a boolean", name, value),
            }
        }
    }

    /// Read a setting by key.
    pub fn get(&self, key: &str) -> Result<bool> {
        match key {
            "experimental" => Ok(self.experimental),
            "lockfile" => Ok(self.lockfile),
            "verbose" => Ok(self.verbose),
            _ => Err(ToolpinError::UnknownSetting {
                key: key.to_string(),
            }),
        }
    }

    /// Set a setting by key.
    pub fn set(&mut self, key: &str, value: bool) -> Result<()> {
        match key {
            "experimental" => self.experimental = value,
            "lockfile" => self.lockfile = value,
            "verbose" => self.verbose = value,
            _ => {
                return Err(ToolpinError::UnknownSetting {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Whether lockfiles should be read and written.
    pub fn lockfile_enabled(&self) -> bool {
        if self.lockfile && !self.experimental {
            tracing::warn!("lockfile support is experimental; set TOOLPIN_EXPERIMENTAL=1 to enable it");
            return false;
        }
        self.lockfile
    }
}

/// Validate a key and parse a value for `settings set`.
pub fn parse_setting(key: &str, raw: &str) -> Result<bool> {
    if !SETTING_KEYS.contains(&key) {
        return Err(ToolpinError::UnknownSetting {
            key: key.to_string(),
        });
    }
    parse_bool(raw).ok_or_else(|| ToolpinError::InvalidSettingValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

/// Parse a boolean the way environment toggles are usually written.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn global(content: &str) -> (TempDir, ConfigFile) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, content).unwrap();
        let file = ConfigFile::load(&path).unwrap();
        (temp, file)
    }

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_are_off() {
        let settings = Settings::default();
        assert!(!settings.experimental);
        assert!(!settings.lockfile);
        assert!(!settings.lockfile_enabled());
    }

    #[test]
    fn reads_settings_table() {
        let (_temp, file) = global("[settings]\nexperimental = true\nlockfile = true\n");
        let settings = Settings::from_file(&file).unwrap();
        assert!(settings.lockfile_enabled());
    }

    #[test]
    fn rejects_non_boolean_known_setting() {
        let (_temp, file) = global("[settings]\nlockfile = \"maybe\"\n");
        assert!(matches!(
            Settings::from_file(&file),
            Err(ToolpinError::InvalidSettingValue { .. })
        ));
    }

    #[test]
    fn env_overrides_file() {
        let (_temp, file) = global("[settings]\nlockfile = false\n");
        let mut settings = Settings::from_file(&file).unwrap();
        settings.apply_env(env(&[
            ("TOOLPIN_LOCKFILE", "1"),
            ("TOOLPIN_EXPERIMENTAL", "true"),
            ("UNRELATED", "1"),
        ]));
        assert!(settings.lockfile);
        assert!(settings.lockfile_enabled());
    }

    #[test]
    fn lockfile_requires_experimental() {
        let mut settings = Settings::default();
        settings.apply_env(env(&[("TOOLPIN_LOCKFILE", "1")]));
        assert!(settings.lockfile);
        assert!(!settings.lockfile_enabled());
    }

    #[test]
    fn invalid_env_value_is_ignored() {
        let mut settings = Settings::default();
        settings.apply_env(env(&[("TOOLPIN_LOCKFILE", "sometimes")]));
        assert!(!settings.lockfile);
    }

    #[test]
    fn get_and_set_by_key() {
        let mut settings = Settings::default();
        settings.set("verbose", true).unwrap();
        assert!(settings.get("verbose").unwrap());
        assert!(matches!(
            settings.get("nope"),
            Err(ToolpinError::UnknownSetting { .. })
        ));
    }

    #[test]
    fn parse_setting_validates() {
        assert!(parse_setting("lockfile", "yes").unwrap());
        assert!(!parse_setting("lockfile", "off").unwrap());
        assert!(parse_setting("lockfile", "perhaps").is_err());
        assert!(parse_setting("colour", "1").is_err());
    }
}
