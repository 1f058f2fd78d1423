//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{global_config_path, ConfigFile, Settings};
use crate::error::Result;
use crate::toolset::Project;
use crate::ui::{OutputMode, UserInterface};

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Applies the `verbose` setting, discovers the project from the
    /// environment, then routes the CLI subcommand to its implementation.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Commands::Completions(args) = &cli.command {
            return super::completions::CompletionsCommand::new(args.clone()).execute(ui);
        }

        let settings = Settings::load(&ConfigFile::load(&global_config_path()?)?)?;
        if settings.verbose && ui.output_mode() == OutputMode::Normal {
            ui.set_output_mode(OutputMode::Verbose);
        }

        let project = Project::discover(&self.project_root)?;
        tracing::debug!(
            root = %self.project_root.display(),
            lockfile = project.lockfile_enabled(),
            "discovered project"
        );
        self.dispatch_with(&project, cli, ui)
    }

    /// Dispatch against an already discovered project.
    pub fn dispatch_with(
        &self,
        project: &Project,
        cli: &Cli,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        match &cli.command {
            Commands::Install(args) => {
                super::install::InstallCommand::new(project, args.clone()).execute(ui)
            }
            Commands::Uninstall(args) => {
                super::uninstall::UninstallCommand::new(project, args.clone()).execute(ui)
            }
            Commands::Use(args) => super::use_tool::UseCommand::new(project, args.clone()).execute(ui),
            Commands::Up(args) => super::up::UpCommand::new(project, args.clone()).execute(ui),
            Commands::Ls(args) => super::ls::LsCommand::new(project, args.clone()).execute(ui),
            Commands::Where(args) => {
                super::where_tool::WhereCommand::new(project, args.clone()).execute(ui)
            }
            Commands::Config(args) => {
                super::config::ConfigCommand::new(project, args.clone()).execute(ui)
            }
            Commands::Settings(args) => {
                super::settings::SettingsCommand::new(project, args.clone()).execute(ui)
            }
            Commands::Run(args) => super::run::RunCommand::new(project, args.clone()).execute(ui),
            Commands::Tasks(args) => {
                super::tasks::TasksCommand::new(project, args.clone()).execute(ui)
            }
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigPaths;
    use crate::toolset::InstallStore;
    use crate::ui::MockUI;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn dispatch_with_routes_to_command() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("toolpin.toml"),
            "[tasks]\nhello = \"echo hello\"\n",
        )
        .unwrap();
        let project = Project::new(
            ConfigPaths::discover(temp.path(), temp.path().join("global.toml")),
            InstallStore::new(temp.path().join("installs")),
            false,
        );
        let cli = Cli::parse_from(["toolpin", "tasks", "ls"]);
        let mut ui = MockUI::new();

        let result = CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch_with(&project, &cli, &mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_message("hello"));
    }
}
