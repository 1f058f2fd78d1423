//! Ls command implementation.
//!
//! Lists installed versions together with the versions the project requests.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::cli::args::LsArgs;
use crate::error::{Result, ToolpinError};
use crate::toolset::Project;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// One row of `ls` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LsEntry {
    pub version: String,
    pub requested_version: Option<String>,
    pub install_path: PathBuf,
    pub source: Option<PathBuf>,
    pub installed: bool,
    pub active: bool,
}

/// The ls command implementation.
pub struct LsCommand {
    project: Project,
    args: LsArgs,
}

impl LsCommand {
    /// Create a new ls command.
    pub fn new(project: &Project, args: LsArgs) -> Self {
        Self {
            project: project.clone(),
            args,
        }
    }

    /// Rows for one tool: installed versions, plus the active version when
    /// it is requested but missing.
    pub fn entries(&self, tool: &str) -> Result<Vec<LsEntry>> {
        let current = self.project.current(tool)?;
        let installs = self.project.installs();

        let mut entries: Vec<LsEntry> = self
            .project
            .installed(tool)?
            .into_iter()
            .map(|version| {
                let version = version.to_string();
                let active = current.as_ref().filter(|c| c.version == version);
                LsEntry {
                    install_path: installs.install_path(tool, &version),
                    requested_version: active.map(|c| c.requested_version.clone()),
                    source: active.map(|c| c.source.clone()),
                    installed: true,
                    active: active.is_some(),
                    version,
                }
            })
            .collect();

        if let Some(current) = current.filter(|c| !c.installed) {
            entries.push(LsEntry {
                version: current.version,
                requested_version: Some(current.requested_version),
                install_path: current.install_path,
                source: Some(current.source),
                installed: false,
                active: true,
            });
        }

        if self.args.current {
            entries.retain(|e| e.active);
        }
        Ok(entries)
    }

    fn tools(&self) -> Result<BTreeSet<String>> {
        let mut tools: BTreeSet<String> = self.project.layers()?.tools()?.into_keys().collect();
        if !self.args.current {
            tools.extend(self.project.installs().tools()?);
        }
        Ok(tools)
    }

    fn format_row(tool: &str, entry: &LsEntry) -> String {
        let mut row = format!("{:<12} {:<12}", tool, entry.version);
        if let (Some(source), Some(requested)) = (&entry.source, &entry.requested_version) {
            row.push_str(&format!(" {:<32} {}", source.display(), requested));
        }
        if !entry.installed {
            row.push_str(" (missing)");
        }
        row.trim_end().to_string()
    }
}

impl Command for LsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let json_error = |e: serde_json::Error| ToolpinError::Other(e.into());

        if let Some(tool) = &self.args.tool {
            let entries = self.entries(tool)?;
            if self.args.json {
                ui.message(&serde_json::to_string_pretty(&entries).map_err(json_error)?);
            } else {
                for entry in &entries {
                    ui.message(&Self::format_row(tool, entry));
                }
            }
            return Ok(CommandResult::success());
        }

        let mut all = BTreeMap::new();
        for tool in self.tools()? {
            let entries = self.entries(&tool)?;
            if !entries.is_empty() {
                all.insert(tool, entries);
            }
        }

        if self.args.json {
            ui.message(&serde_json::to_string_pretty(&all).map_err(json_error)?);
        } else {
            for (tool, entries) in &all {
                for entry in entries {
                    ui.message(&Self::format_row(tool, entry));
                }
            }
        }
        Ok(CommandResult::success())
    }
}
