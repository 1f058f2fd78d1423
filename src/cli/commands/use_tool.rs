//! Use command implementation.
//!
//! `toolpin use tool@specifier` resolves the specifier against installed
//! versions, writes it to the project (or global) config, and pins the
//! resolved version in the sibling lockfile when lockfile mode is on.

use crate::cli::args::UseArgs;
use crate::error::Result;
use crate::toolset::{Project, ToolRequest};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The use command implementation.
pub struct UseCommand {
    project: Project,
    args: UseArgs,
}

impl UseCommand {
    /// Create a new use command.
    pub fn new(project: &Project, args: UseArgs) -> Self {
        Self {
            project: project.clone(),
            args,
        }
    }
}

impl Command for UseCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        // Validate every argument before touching any file.
        let requests = self
            .args
            .tools
            .iter()
            .map(|raw| ToolRequest::parse(raw))
            .collect::<Result<Vec<_>>>()?;
        for request in &requests {
            request.require_specifier()?;
        }

        for request in &requests {
            let specifier = request.require_specifier()?;
            let report = self
                .project
                .use_tool(&request.tool, specifier, self.args.global)?;
            ui.success(&format!(
                "{}: tools.{} = \"{}\" -> {}",
                report.config_path.display(),
                report.tool,
                report.specifier,
                report.version
            ));
            if let Some(lockfile) = &report.lockfile_path {
                ui.detail(&format!(
                    "Locked {}@{} in {}",
                    report.tool,
                    report.version,
                    lockfile.display()
                ));
            }
        }
        Ok(CommandResult::success())
    }
}
