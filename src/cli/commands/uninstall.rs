//! Uninstall command implementation.

use crate::cli::args::UninstallArgs;
use crate::error::Result;
use crate::toolset::{Project, ToolRequest};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The uninstall command implementation.
pub struct UninstallCommand {
    project: Project,
    args: UninstallArgs,
}

impl UninstallCommand {
    /// Create a new uninstall command.
    pub fn new(project: &Project, args: UninstallArgs) -> Self {
        Self {
            project: project.clone(),
            args,
        }
    }
}

impl Command for UninstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut missing = false;
        for raw in &self.args.tools {
            let request = ToolRequest::parse(raw)?;
            let version = request.require_specifier()?;
            if self.project.uninstall(&request.tool, version)? {
                ui.success(&format!("Uninstalled {}@{}", request.tool, version));
            } else {
                ui.warning(&format!("{}@{} is not installed", request.tool, version));
                missing = true;
            }
        }

        if missing {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
