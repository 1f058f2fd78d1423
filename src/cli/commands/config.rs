//! Config command implementation.
//!
//! `toolpin config get|set` reads and writes dotted keys in one config
//! file; `toolpin config ls` shows which files are merged.

use std::path::{Path, PathBuf};

use toml::Value;

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{display_value, parse_value, ConfigFile};
use crate::error::Result;
use crate::toolset::Project;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    project: Project,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project: &Project, args: ConfigArgs) -> Self {
        Self {
            project: project.clone(),
            args,
        }
    }

    fn target(&self, file: &Option<PathBuf>) -> PathBuf {
        file.clone()
            .unwrap_or_else(|| self.project.paths().project_target())
    }

    fn get(&self, ui: &mut dyn UserInterface, key: &str, path: &Path) -> Result<CommandResult> {
        let file = ConfigFile::load_existing(path)?;
        match file.get(key) {
            Some(value) => {
                ui.message(&display_value(value)?);
                Ok(CommandResult::success())
            }
            None => {
                ui.error(&format!("{} is not set in {}", key, path.display()));
                Ok(CommandResult::failure(1))
            }
        }
    }

    fn set(
        &self,
        ui: &mut dyn UserInterface,
        key: &str,
        raw: &str,
        path: &Path,
    ) -> Result<CommandResult> {
        let original = ConfigFile::load(path)?;
        let mut file = original.clone();
        file.set(key, parse_value(raw))?;

        // `tools.node = 20` is meant as the string "20"; retry as a string
        // before rejecting an edit that would leave the file unreadable.
        if file.typed().is_err() {
            file = original;
            file.set(key, Value::String(raw.to_string()))?;
            file.typed()?;
        }
        file.save()?;
        ui.success(&format!("Set {} in {}", key, path.display()));
        Ok(CommandResult::success())
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.args.action {
            ConfigAction::Get { key, file } => self.get(ui, key, &self.target(file)),
            ConfigAction::Set { key, value, file } => self.set(ui, key, value, &self.target(file)),
            ConfigAction::Ls => {
                for path in self.project.paths().all_existing() {
                    ui.message(&path.display().to_string());
                }
                Ok(CommandResult::success())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::TestProject;
    use crate::error::ToolpinError;
    use crate::ui::MockUI;

    fn config(fx: &TestProject, action: ConfigAction) -> Result<(CommandResult, MockUI)> {
        let mut ui = MockUI::new();
        let result =
            ConfigCommand::new(&fx.project(false), ConfigArgs { action }).execute(&mut ui)?;
        Ok((result, ui))
    }

    fn get(key: &str) -> ConfigAction {
        ConfigAction::Get {
            key: key.to_string(),
            file: None,
        }
    }

    #[test]
    fn get_prints_strings_bare() {
        let fx = TestProject::new();
        fx.write_config("[tools]\ntiny = \"1\"\n");

        let (_, ui) = config(&fx, get("tools.tiny")).unwrap();

        assert_eq!(ui.messages(), &["1"]);
    }

    #[test]
    fn get_prints_tables_as_toml() {
        let fx = TestProject::new();
        fx.write_config("[tools]\ntiny = \"1\"\nnode = \"20\"\n");

        let (_, ui) = config(&fx, get("tools")).unwrap();

        assert_eq!(ui.stdout(), "node = \"20\"\ntiny = \"1\"");
    }

    #[test]
    fn get_missing_key_fails() {
        let fx = TestProject::new();
        fx.write_config("[tools]\n");

        let (result, ui) = config(&fx, get("tools.tiny")).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("tools.tiny is not set"));
    }

    #[test]
    fn get_without_config_file_fails() {
        let fx = TestProject::new();
        let err = config(&fx, get("tools")).err().unwrap();
        assert!(matches!(err, ToolpinError::ConfigNotFound { .. }));
    }

    #[test]
    fn get_reads_explicit_file() {
        let fx = TestProject::new();
        fx.write("other.toml", "[tools]\nnode = \"18\"\n");

        let (_, ui) = config(
            &fx,
            ConfigAction::Get {
                key: "tools.node".into(),
                file: Some(fx.root().join("other.toml")),
            },
        )
        .unwrap();

        assert_eq!(ui.messages(), &["18"]);
    }

    #[test]
    fn set_creates_and_preserves_keys() {
        let fx = TestProject::new();
        fx.write_config("[tools]\ntiny = \"1\"\n");

        config(
            &fx,
            ConfigAction::Set {
                key: "tools.node".into(),
                value: "20".into(),
                file: None,
            },
        )
        .unwrap();

        let content = fx.read("toolpin.toml");
        assert!(content.contains("tiny = \"1\""));
        assert!(content.contains("node = \"20\""));
    }

    #[test]
    fn set_rejects_invalid_schema() {
        let fx = TestProject::new();
        fx.write_config("[tools]\ntiny = \"1\"\n");

        let result = config(
            &fx,
            ConfigAction::Set {
                key: "tools".into(),
                value: "[1]".into(),
                file: None,
            },
        );

        assert!(result.is_err());
        assert_eq!(fx.read("toolpin.toml"), "[tools]\ntiny = \"1\"\n");
    }

    #[test]
    fn set_keeps_typed_values_where_valid() {
        let fx = TestProject::new();

        config(
            &fx,
            ConfigAction::Set {
                key: "tasks.build.depends".into(),
                value: "[\"lint\"]".into(),
                file: None,
            },
        )
        .unwrap();

        assert!(fx.read("toolpin.toml").contains("depends = [\"lint\"]"));
    }

    #[test]
    fn ls_lists_existing_files() {
        let fx = TestProject::new();
        fx.write_config("");
        fx.write("toolpin.local.toml", "");

        let (_, ui) = config(&fx, ConfigAction::Ls).unwrap();

        assert_eq!(ui.messages().len(), 2);
        assert!(ui.messages()[1].ends_with("toolpin.local.toml"));
    }
}
