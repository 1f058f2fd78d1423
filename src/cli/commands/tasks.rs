//! Tasks command implementation.

use crate::cli::args::{TasksAction, TasksArgs};
use crate::error::Result;
use crate::toolset::Project;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The tasks command implementation.
pub struct TasksCommand {
    project: Project,
    args: TasksArgs,
}

impl TasksCommand {
    /// Create a new tasks command.
    pub fn new(project: &Project, args: TasksArgs) -> Self {
        Self {
            project: project.clone(),
            args,
        }
    }
}

impl Command for TasksCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.args.action.as_ref().unwrap_or(&TasksAction::Ls) {
            TasksAction::Ls => {
                let tasks = self.project.layers()?.tasks()?;
                if tasks.is_empty() {
                    ui.warning("No tasks defined");
                }
                let width = tasks.keys().map(String::len).max().unwrap_or(0);
                for (name, task) in &tasks {
                    let line = match &task.config.description {
                        Some(desc) => format!("{:<width$}  {}", name, desc),
                        None => name.clone(),
                    };
                    ui.message(&line);
                }
            }
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::TestProject;
    use crate::ui::MockUI;

    fn tasks(fx: &TestProject) -> MockUI {
        let mut ui = MockUI::new();
        TasksCommand::new(&fx.project(false), TasksArgs::default())
            .execute(&mut ui)
            .unwrap();
        ui
    }

    #[test]
    fn lists_tasks_sorted_with_descriptions() {
        let fx = TestProject::new();
        fx.write_config(
            "[tasks]\ntest = \"cargo test\"\n\n\
             [tasks.build]\nrun = \"cargo build\"\ndescription = \"Compile\"\n",
        );

        let ui = tasks(&fx);

        assert_eq!(ui.messages(), &["build  Compile", "test"]);
    }

    #[test]
    fn local_config_overrides_task() {
        let fx = TestProject::new();
        fx.write_config("[tasks.build]\nrun = \"make\"\ndescription = \"Project\"\n");
        fx.write(
            "toolpin.local.toml",
            "[tasks.build]\nrun = \"make -j8\"\ndescription = \"Local\"\n",
        );

        let ui = tasks(&fx);

        assert_eq!(ui.messages(), &["build  Local"]);
    }

    #[test]
    fn warns_when_empty() {
        let fx = TestProject::new();
        let ui = tasks(&fx);
        assert!(ui.messages().is_empty());
        assert!(ui.has_warning("No tasks defined"));
    }
}
