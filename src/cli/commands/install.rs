//! Install command implementation.
//!
//! `toolpin install [tool[@version]...]` records versions in the install
//! store. Without arguments every declared tool is installed.

use crate::cli::args::InstallArgs;
use crate::error::Result;
use crate::toolset::{InstallOutcome, InstallReport, Project, ToolRequest};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    project: Project,
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(project: &Project, args: InstallArgs) -> Self {
        Self {
            project: project.clone(),
            args,
        }
    }

    fn report(&self, ui: &mut dyn UserInterface, report: &InstallReport) {
        match report.outcome {
            InstallOutcome::Installed => {
                ui.success(&format!("Installed {}@{}", report.tool, report.version))
            }
            InstallOutcome::AlreadyInstalled => ui.detail(&format!(
                "{}@{} is already installed",
                report.tool, report.version
            )),
        }
        if let Some(locked) = &report.locked {
            ui.detail(&format!("Locked {}@{}", report.tool, locked));
        }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.tools.is_empty() {
            let reports = self.project.install_all()?;
            if reports.is_empty() {
                ui.warning("No tools configured");
            }
            for report in &reports {
                self.report(ui, report);
            }
            return Ok(CommandResult::success());
        }

        let requests = self
            .args
            .tools
            .iter()
            .map(|raw| ToolRequest::parse(raw))
            .collect::<Result<Vec<_>>>()?;
        for request in &requests {
            let report = self.project.install_request(request)?;
            self.report(ui, &report);
        }
        Ok(CommandResult::success())
    }
}
