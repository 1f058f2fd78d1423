//! Task planning and execution.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::config::DeclaredTask;
use crate::error::{Result, ToolpinError};
use crate::shell::{self, CommandOptions};

use super::invocation::{Declared, Invocation};
use super::render::{render, RenderContext, RenderError};
use super::template::Template;

/// A rendered command ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCommand {
    /// Task the command belongs to.
    pub task: String,
    /// Rendered command line.
    pub command: String,
    /// Working directory.
    pub cwd: PathBuf,
    /// Task-level environment.
    pub env: BTreeMap<String, String>,
}

/// Runs declared tasks.
#[derive(Debug, Clone)]
pub struct TaskRunner {
    tasks: BTreeMap<String, DeclaredTask>,
    process_env: BTreeMap<String, String>,
}

impl TaskRunner {
    /// Create a runner over the merged task declarations.
    pub fn new(tasks: BTreeMap<String, DeclaredTask>) -> Self {
        Self::with_env(tasks, std::env::vars().collect())
    }

    /// Create a runner with an explicit process environment for `env.NAME`.
    pub fn with_env(
        tasks: BTreeMap<String, DeclaredTask>,
        process_env: BTreeMap<String, String>,
    ) -> Self {
        Self { tasks, process_env }
    }

    /// Declared tasks by name.
    pub fn tasks(&self) -> &BTreeMap<String, DeclaredTask> {
        &self.tasks
    }

    fn get(&self, name: &str) -> Result<&DeclaredTask> {
        self.tasks.get(name).ok_or_else(|| ToolpinError::UnknownTask {
            name: name.to_string(),
        })
    }

    /// Tasks in execution order: dependencies first, each task once.
    pub fn plan(&self, name: &str) -> Result<Vec<&DeclaredTask>> {
        #[derive(Clone, Copy, PartialEq)]
        enum State {
            Visiting,
            Visited,
        }

        fn visit<'a>(
            runner: &'a TaskRunner,
            name: &str,
            state: &mut HashMap<String, State>,
            path: &mut Vec<String>,
            order: &mut Vec<&'a DeclaredTask>,
        ) -> Result<()> {
            match state.get(name) {
                Some(State::Visited) => return Ok(()),
                Some(State::Visiting) => {
                    let start = path.iter().position(|s| s == name).unwrap_or(0);
                    let mut cycle = path[start..].to_vec();
                    cycle.push(name.to_string());
                    return Err(ToolpinError::CircularDependency {
                        cycle: cycle.join(" -> "),
                    });
                }
                None => {}
            }

            let task = runner.get(name)?;
            state.insert(name.to_string(), State::Visiting);
            path.push(name.to_string());

            for dep in &task.config.depends {
                visit(runner, dep, state, path, order)?;
            }

            path.pop();
            state.insert(name.to_string(), State::Visited);
            order.push(task);
            Ok(())
        }

        let mut order = Vec::new();
        visit(self, name, &mut HashMap::new(), &mut Vec::new(), &mut order)?;
        Ok(order)
    }

    /// Render every command `run <name> <args>` would execute.
    ///
    /// Arguments go to the named task only; dependencies render with none.
    pub fn prepare(&self, name: &str, args: &[String]) -> Result<Vec<PreparedCommand>> {
        let mut commands = Vec::new();
        for task in self.plan(name)? {
            let task_args: &[String] = if task.name == name { args } else { &[] };
            commands.extend(self.prepare_task(task, task_args)?);
        }
        Ok(commands)
    }

    fn prepare_task(&self, task: &DeclaredTask, args: &[String]) -> Result<Vec<PreparedCommand>> {
        let templates = task
            .config
            .run
            .lines()
            .into_iter()
            .map(Template::parse)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ToolpinError::TemplateError {
                task: task.name.clone(),
                message: e.to_string(),
            })?;

        let declared = Declared {
            flags: templates.iter().flat_map(Template::flag_names).collect(),
            options: templates.iter().flat_map(Template::option_names).collect(),
        };
        let invocation =
            Invocation::parse(args, &declared).map_err(|message| ToolpinError::InvalidTaskArguments {
                task: task.name.clone(),
                message,
            })?;

        let mut env = self.process_env.clone();
        env.extend(task.config.env.clone());

        let cwd = match &task.config.dir {
            Some(dir) => task.config_root.join(dir),
            None => task.config_root.clone(),
        };

        let last = templates.len().saturating_sub(1);
        templates
            .iter()
            .enumerate()
            .map(|(i, template)| {
                let ctx = RenderContext {
                    invocation: &invocation,
                    env: &env,
                    config_root: &task.config_root,
                    append_unused: i == last,
                };
                let command = render(template, &ctx).map_err(|e| match e {
                    RenderError::MissingArgument { position } => ToolpinError::MissingTaskArgument {
                        task: task.name.clone(),
                        position,
                    },
                })?;
                Ok(PreparedCommand {
                    task: task.name.clone(),
                    command,
                    cwd: cwd.clone(),
                    env: task.config.env.clone(),
                })
            })
            .collect()
    }

    /// Run a task and its dependencies, stopping at the first failure.
    ///
    /// `on_start` is called before each command is spawned.
    pub fn run<F>(&self, name: &str, args: &[String], mut on_start: F) -> Result<()>
    where
        F: FnMut(&PreparedCommand),
    {
        let commands = self.prepare(name, args)?;
        for prepared in &commands {
            tracing::debug!(task = %prepared.task, "running: {}", prepared.command);
            on_start(prepared);
            let options = CommandOptions {
                cwd: Some(prepared.cwd.clone()),
                env: prepared.env.clone(),
                ..Default::default()
            };
            let result = shell::execute(&prepared.command, &options)?;
            tracing::debug!(task = %prepared.task, code = ?result.exit_code, "finished in {:?}", result.duration);
            if !result.success {
                return Err(ToolpinError::CommandFailed {
                    command: prepared.command.clone(),
                    code: result.exit_code,
                });
            }
        }
        Ok(())
    }
}
