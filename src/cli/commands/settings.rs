//! Settings command implementation.
//!
//! Settings are stored in the `[settings]` table of the global config file.
//! `ls` and `get` show effective values, including `TOOLPIN_*` overrides.

use toml::Value;

use crate::cli::args::{SettingsAction, SettingsArgs};
use crate::config::{parse_setting, ConfigFile, Settings, SETTING_KEYS};
use crate::error::{Result, ToolpinError};
use crate::toolset::Project;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The settings command implementation.
pub struct SettingsCommand {
    project: Project,
    args: SettingsArgs,
    env: Vec<(String, String)>,
}

impl SettingsCommand {
    /// Create a new settings command reading overrides from the process.
    pub fn new(project: &Project, args: SettingsArgs) -> Self {
        Self::with_env(project, args, std::env::vars().collect())
    }

    /// Create a settings command with explicit environment overrides.
    pub fn with_env(project: &Project, args: SettingsArgs, env: Vec<(String, String)>) -> Self {
        Self {
            project: project.clone(),
            args,
            env,
        }
    }

    fn global(&self) -> Result<ConfigFile> {
        ConfigFile::load(&self.project.paths().global)
    }

    fn effective(&self) -> Result<Settings> {
        let mut settings = Settings::from_file(&self.global()?)?;
        settings.apply_env(self.env.iter().cloned());
        Ok(settings)
    }
}

impl Command for SettingsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.args.action.as_ref().unwrap_or(&SettingsAction::Ls) {
            SettingsAction::Ls => {
                let settings = self.effective()?;
                for key in SETTING_KEYS {
                    ui.message(&format!("{:<14} {}", key, settings.get(key)?));
                }
            }
            SettingsAction::Get { key } => {
                ui.message(&self.effective()?.get(key)?.to_string());
            }
            SettingsAction::Set { key, value } => {
                let flag = parse_setting(key, value)?;
                let mut file = self.global()?;
                file.set(&format!("settings.{}", key), Value::Boolean(flag))?;
                file.save()?;
                ui.success(&format!("{} = {}", key, flag));
            }
            SettingsAction::Unset { key } => {
                if !SETTING_KEYS.contains(&key.as_str()) {
                    return Err(ToolpinError::UnknownSetting { key: key.clone() });
                }
                let mut file = self.global()?;
                if file.remove(&format!("settings.{}", key))?.is_some() {
                    file.save()?;
                    ui.success(&format!("Unset {}", key));
                } else {
                    ui.detail(&format!("{} was not set", key));
                }
            }
        }
        Ok(CommandResult::success())
    }
}
