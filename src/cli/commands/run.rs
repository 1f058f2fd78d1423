//! Run command implementation.
//!
//! The `toolpin run` command renders a task's templates with the given
//! arguments and runs it after its dependencies.

use crate::cli::args::RunArgs;
use crate::error::{Result, ToolpinError};
use crate::tasks::TaskRunner;
use crate::toolset::Project;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    project: Project,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project: &Project, args: RunArgs) -> Self {
        Self {
            project: project.clone(),
            args,
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let runner = TaskRunner::new(self.project.layers()?.tasks()?);

        let outcome = runner.run(self.args.task(), self.args.args(), |prepared| {
            ui.detail(&format!("[{}] $ {}", prepared.task, prepared.command));
        });

        match outcome {
            Ok(()) => Ok(CommandResult::success()),
            Err(ToolpinError::CommandFailed { command, code }) => {
                let code = code.unwrap_or(1);
                ui.error(&format!("{} exited with code {}", command, code));
                Ok(CommandResult::failure(code))
            }
            Err(e) => Err(e),
        }
    }
}
