//! Up command implementation.
//!
//! `toolpin up` re-resolves declared tools against the installed versions
//! and moves lockfile pins. `--bump` ignores the specifier, takes the newest
//! installed version and rewrites the specifier to its leading component.

use crate::cli::args::UpArgs;
use crate::error::Result;
use crate::toolset::Project;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The up command implementation.
pub struct UpCommand {
    project: Project,
    args: UpArgs,
}

impl UpCommand {
    /// Create a new up command.
    pub fn new(project: &Project, args: UpArgs) -> Self {
        Self {
            project: project.clone(),
            args,
        }
    }
}

impl Command for UpCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let reports = self.project.upgrade(&self.args.tools, self.args.bump)?;
        if reports.is_empty() {
            ui.warning("No tools configured");
        }

        for report in &reports {
            if !report.changed() {
                ui.detail(&format!("{} {} is up to date", report.tool, report.to));
                continue;
            }
            let from = report.from.as_deref().unwrap_or("-");
            ui.success(&format!("{} {} -> {}", report.tool, from, report.to));
            if report.specifier != report.previous_specifier {
                ui.detail(&format!(
                    "{}: \"{}\" -> \"{}\"",
                    report.tool, report.previous_specifier, report.specifier
                ));
            }
        }
        Ok(CommandResult::success())
    }
}
