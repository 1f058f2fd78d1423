//! Where command implementation.

use crate::cli::args::WhereArgs;
use crate::error::Result;
use crate::toolset::{Project, ToolRequest};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The where command implementation.
pub struct WhereCommand {
    project: Project,
    args: WhereArgs,
}

impl WhereCommand {
    /// Create a new where command.
    pub fn new(project: &Project, args: WhereArgs) -> Self {
        Self {
            project: project.clone(),
            args,
        }
    }
}

impl Command for WhereCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let request = ToolRequest::parse(&self.args.tool)?;
        let path = self.project.where_installed(&request)?;
        ui.message(&path.display().to_string());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::TestProject;
    use crate::error::ToolpinError;
    use crate::ui::MockUI;

    fn where_tool(fx: &TestProject, tool: &str) -> Result<MockUI> {
        let mut ui = MockUI::new();
        WhereCommand::new(
            &fx.project(false),
            WhereArgs {
                tool: tool.to_string(),
            },
        )
        .execute(&mut ui)?;
        Ok(ui)
    }

    #[test]
    fn prints_path_of_resolved_version() {
        let fx = TestProject::new();
        fx.install("tiny", &["1.0.0", "1.0.1"]);

        let ui = where_tool(&fx, "tiny@1").unwrap();

        let expected = fx.installs().install_path("tiny", "1.0.1");
        assert_eq!(ui.messages(), &[expected.display().to_string()]);
    }

    #[test]
    fn uses_declared_version_without_specifier() {
        let fx = TestProject::new();
        fx.write_config("[tools]\ntiny = \"1.0\"\n");
        fx.install("tiny", &["1.0.0", "1.1.0"]);

        let ui = where_tool(&fx, "tiny").unwrap();

        assert!(ui.stdout().ends_with("1.0.0"));
    }

    #[test]
    fn undeclared_tool_without_specifier_fails() {
        let fx = TestProject::new();
        let err = where_tool(&fx, "tiny").err().unwrap();
        assert!(matches!(err, ToolpinError::ToolNotConfigured { .. }));
    }

    #[test]
    fn uninstalled_version_fails() {
        let fx = TestProject::new();
        fx.install("tiny", &["1.0.0"]);
        let err = where_tool(&fx, "tiny@2").err().unwrap();
        assert!(matches!(err, ToolpinError::VersionNotFound { .. }));
    }
}
