//! Tool operations against a project's config files, lockfiles, and installs.
//!
//! A [`Project`] holds no parsed state between calls: every operation loads
//! the files it needs, mutates them, and saves them before returning.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{
    data_dir, global_config_path, ConfigFile, ConfigLayers, ConfigPaths, Settings,
    ToolDeclaration,
};
use crate::error::{Result, ToolpinError};

use super::installs::{InstallOutcome, InstallStore};
use super::lockfile::Lockfile;
use super::request::ToolRequest;
use super::resolver::{resolve, resolve_latest};
use super::version::{Version, LATEST};

/// Result of `use`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseReport {
    pub tool: String,
    pub specifier: String,
    pub version: String,
    /// Config file the specifier was written to.
    pub config_path: PathBuf,
    /// Lockfile that was updated, if lockfile mode is on.
    pub lockfile_path: Option<PathBuf>,
}

/// Result of `install`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub tool: String,
    pub version: String,
    pub outcome: InstallOutcome,
    /// Version pinned because the tool had no lockfile entry yet.
    pub locked: Option<String>,
}

/// Result of `up` for one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeReport {
    pub tool: String,
    /// Previously pinned version, when a lockfile entry existed.
    pub from: Option<String>,
    pub to: String,
    pub previous_specifier: String,
    pub specifier: String,
}

impl UpgradeReport {
    /// Whether anything observable changed.
    pub fn changed(&self) -> bool {
        self.from.as_deref() != Some(self.to.as_str()) || self.previous_specifier != self.specifier
    }
}

/// The active version of a declared tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentVersion {
    pub tool: String,
    /// Specifier from config.
    pub requested_version: String,
    /// Pinned or resolved version; the specifier itself when nothing resolves.
    pub version: String,
    pub install_path: PathBuf,
    /// Config file that declared the tool.
    pub source: PathBuf,
    pub installed: bool,
    /// Whether `version` came from a lockfile.
    pub locked: bool,
}

/// A project: its config files, the install store, and lockfile mode.
#[derive(Debug, Clone)]
pub struct Project {
    paths: ConfigPaths,
    installs: InstallStore,
    lockfile: bool,
}

impl Project {
    /// Create a project from explicit parts.
    pub fn new(paths: ConfigPaths, installs: InstallStore, lockfile: bool) -> Self {
        Self {
            paths,
            installs,
            lockfile,
        }
    }

    /// Discover a project using the global config, data directory, and settings
    /// of the current environment.
    pub fn discover(project_root: &Path) -> Result<Self> {
        let paths = ConfigPaths::discover(project_root, global_config_path()?);
        let settings = Settings::load(&ConfigFile::load(&paths.global)?)?;
        let installs = InstallStore::new(data_dir()?.join("installs"));
        Ok(Self::new(paths, installs, settings.lockfile_enabled()))
    }

    /// Config file paths.
    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Install store.
    pub fn installs(&self) -> &InstallStore {
        &self.installs
    }

    /// Whether lockfiles are read and written.
    pub fn lockfile_enabled(&self) -> bool {
        self.lockfile
    }

    /// Load all config layers.
    pub fn layers(&self) -> Result<ConfigLayers> {
        ConfigLayers::load(&self.paths)
    }

    fn declaration(&self, tool: &str) -> Result<ToolDeclaration> {
        self.layers()?
            .tool(tool)?
            .ok_or_else(|| ToolpinError::ToolNotConfigured {
                tool: tool.to_string(),
            })
    }

    fn pinned(&self, decl: &ToolDeclaration) -> Result<Option<String>> {
        if !self.lockfile {
            return Ok(None);
        }
        let lock = Lockfile::load(&Lockfile::path_for(&decl.source))?;
        Ok(lock.get(&decl.tool).map(String::from))
    }

    fn pin(&self, config_path: &Path, tool: &str, version: &str) -> Result<Option<PathBuf>> {
        if !self.lockfile {
            return Ok(None);
        }
        let path = Lockfile::path_for(config_path);
        let mut lock = Lockfile::load(&path)?;
        if lock.set(tool, version).as_deref() != Some(version) || !path.exists() {
            lock.save(&path)?;
            tracing::debug!("pinned {}@{} in {}", tool, version, path.display());
        }
        Ok(Some(path))
    }

    /// Request a tool version for this project (or globally).
    ///
    /// The specifier is resolved against installed versions first; nothing
    /// is written when it does not resolve.
    pub fn use_tool(&self, tool: &str, specifier: &str, global: bool) -> Result<UseReport> {
        let installed = self.installs.list(tool)?;
        let version = resolve(tool, specifier, &installed)?;

        let config_path = if global {
            self.paths.global.clone()
        } else {
            self.paths.project_target()
        };
        let mut file = ConfigFile::load(&config_path)?;
        file.set_tool(tool, specifier)?;
        file.save()?;

        let lockfile_path = self.pin(&config_path, tool, version.as_str())?;

        Ok(UseReport {
            tool: tool.to_string(),
            specifier: specifier.to_string(),
            version: version.to_string(),
            config_path,
            lockfile_path,
        })
    }

    /// Install an exact version.
    ///
    /// Config is never touched. The lockfile is only written when the tool
    /// is declared and has no pin yet.
    pub fn install(&self, tool: &str, version: &str) -> Result<InstallReport> {
        let outcome = self.installs.install(tool, version)?;
        let locked = self.pin_if_missing(tool)?;
        Ok(InstallReport {
            tool: tool.to_string(),
            version: version.to_string(),
            outcome,
            locked,
        })
    }

    /// Install from a `tool[@version]` request.
    ///
    /// Without a version, the pinned version is installed, or the declared
    /// specifier taken as an exact version if nothing installed satisfies it.
    pub fn install_request(&self, request: &ToolRequest) -> Result<InstallReport> {
        match &request.specifier {
            Some(version) => self.install(&request.tool, version),
            None => {
                let version = self.install_target(&self.declaration(&request.tool)?)?;
                self.install(&request.tool, &version)
            }
        }
    }

    /// Install every declared tool.
    pub fn install_all(&self) -> Result<Vec<InstallReport>> {
        let declared = self.layers()?.tools()?;
        let mut reports = Vec::with_capacity(declared.len());
        for decl in declared.values() {
            let version = self.install_target(decl)?;
            reports.push(self.install(&decl.tool, &version)?);
        }
        Ok(reports)
    }

    fn install_target(&self, decl: &ToolDeclaration) -> Result<String> {
        if let Some(pinned) = self.pinned(decl)? {
            return Ok(pinned);
        }
        let installed = self.installs.list(&decl.tool)?;
        if let Ok(version) = resolve(&decl.tool, &decl.specifier, &installed) {
            return Ok(version.to_string());
        }
        if decl.specifier == LATEST {
            return Err(ToolpinError::InvalidToolRequest {
                input: format!("{}@{}", decl.tool, LATEST),
                message: "an exact version is required to install".to_string(),
            });
        }
        Ok(decl.specifier.clone())
    }

    fn pin_if_missing(&self, tool: &str) -> Result<Option<String>> {
        if !self.lockfile {
            return Ok(None);
        }
        let Some(decl) = self.layers()?.tool(tool)? else {
            return Ok(None);
        };
        if self.pinned(&decl)?.is_some() {
            return Ok(None);
        }
        let installed = self.installs.list(tool)?;
        match resolve(tool, &decl.specifier, &installed) {
            Ok(version) => {
                self.pin(&decl.source, tool, version.as_str())?;
                Ok(Some(version.to_string()))
            }
            Err(ToolpinError::VersionNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Re-resolve declared tools against installed versions.
    ///
    /// Without `bump`, the existing specifier is kept and only the lockfile
    /// moves. With `bump`, the highest installed version wins regardless of
    /// the specifier, and the specifier is rewritten to track it.
    /// An empty `tools` slice upgrades every declared tool.
    pub fn upgrade(&self, tools: &[String], bump: bool) -> Result<Vec<UpgradeReport>> {
        let declared = self.layers()?.tools()?;
        let selected: Vec<&ToolDeclaration> = if tools.is_empty() {
            declared.values().collect()
        } else {
            tools
                .iter()
                .map(|name| {
                    declared
                        .get(name)
                        .ok_or_else(|| ToolpinError::ToolNotConfigured { tool: name.clone() })
                })
                .collect::<Result<_>>()?
        };

        let mut reports = Vec::with_capacity(selected.len());
        for decl in selected {
            reports.push(self.upgrade_one(decl, bump)?);
        }
        Ok(reports)
    }

    fn upgrade_one(&self, decl: &ToolDeclaration, bump: bool) -> Result<UpgradeReport> {
        let installed = self.installs.list(&decl.tool)?;
        let (version, specifier) = if bump {
            let version = resolve_latest(&decl.tool, &installed)?;
            let specifier = version.bumped_specifier(&decl.specifier);
            (version, specifier)
        } else {
            let version = resolve(&decl.tool, &decl.specifier, &installed)?;
            (version, decl.specifier.clone())
        };

        if specifier != decl.specifier {
            let mut file = ConfigFile::load(&decl.source)?;
            file.set_tool(&decl.tool, &specifier)?;
            file.save()?;
            tracing::debug!(
                "bumped {} from '{}' to '{}' in {}",
                decl.tool,
                decl.specifier,
                specifier,
                decl.source.display()
            );
        }

        let from = self.pinned(decl)?;
        self.pin(&decl.source, &decl.tool, version.as_str())?;

        Ok(UpgradeReport {
            tool: decl.tool.clone(),
            from,
            to: version.to_string(),
            previous_specifier: decl.specifier.clone(),
            specifier,
        })
    }

    /// Current version of one declared tool.
    pub fn current(&self, tool: &str) -> Result<Option<CurrentVersion>> {
        match self.layers()?.tool(tool)? {
            Some(decl) => self.current_for(&decl).map(Some),
            None => Ok(None),
        }
    }

    fn current_for(&self, decl: &ToolDeclaration) -> Result<CurrentVersion> {
        let pinned = self.pinned(decl)?;
        let locked = pinned.is_some();
        let resolved = match pinned {
            Some(version) => Some(version),
            None => {
                let installed = self.installs.list(&decl.tool)?;
                match resolve(&decl.tool, &decl.specifier, &installed) {
                    Ok(version) => Some(version.to_string()),
                    Err(ToolpinError::VersionNotFound { .. }) => None,
                    Err(e) => return Err(e),
                }
            }
        };

        let version = resolved.unwrap_or_else(|| decl.specifier.clone());
        Ok(CurrentVersion {
            tool: decl.tool.clone(),
            requested_version: decl.specifier.clone(),
            install_path: self.installs.install_path(&decl.tool, &version),
            installed: self.installs.is_installed(&decl.tool, &version),
            source: decl.source.clone(),
            version,
            locked,
        })
    }

    /// Install directory for `tool` (current version) or `tool@specifier`.
    pub fn where_installed(&self, request: &ToolRequest) -> Result<PathBuf> {
        let tool = &request.tool;
        let (specifier, version) = match &request.specifier {
            Some(specifier) => {
                let installed = self.installs.list(tool)?;
                let version = resolve(tool, specifier, &installed)?;
                (specifier.clone(), version.to_string())
            }
            None => {
                let current = self
                    .current(tool)?
                    .ok_or_else(|| ToolpinError::ToolNotConfigured { tool: tool.clone() })?;
                (current.requested_version, current.version)
            }
        };

        if !self.installs.is_installed(tool, &version) {
            return Err(ToolpinError::VersionNotFound {
                tool: tool.clone(),
                specifier,
            });
        }
        Ok(self.installs.install_path(tool, &version))
    }

    /// Remove an installed version.
    ///
    /// A lockfile pin that points at the removed version is dropped too.
    pub fn uninstall(&self, tool: &str, version: &str) -> Result<bool> {
        let removed = self.installs.uninstall(tool, version)?;
        if removed {
            self.unpin(tool, version)?;
        }
        Ok(removed)
    }

    fn unpin(&self, tool: &str, version: &str) -> Result<()> {
        if !self.lockfile {
            return Ok(());
        }
        let Some(decl) = self.layers()?.tool(tool)? else {
            return Ok(());
        };
        let path = Lockfile::path_for(&decl.source);
        let mut lock = Lockfile::load(&path)?;
        if lock.get(tool) == Some(version) {
            lock.remove(tool);
            lock.save(&path)?;
            tracing::debug!("unpinned {}@{} in {}", tool, version, path.display());
        }
        Ok(())
    }

    /// Installed versions of a tool.
    pub fn installed(&self, tool: &str) -> Result<Vec<Version>> {
        self.installs.list(tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        temp: TempDir,
        project: Project,
    }

    impl Fixture {
        fn new(lockfile: bool) -> Self {
            let temp = TempDir::new().unwrap();
            let root = temp.path().join("project");
            fs::create_dir_all(&root).unwrap();
            let project = Self::open(&temp, lockfile);
            Self { temp, project }
        }

        fn open(temp: &TempDir, lockfile: bool) -> Project {
            let root = temp.path().join("project");
            let paths = ConfigPaths::discover(&root, temp.path().join("global.toml"));
            let installs = InstallStore::new(temp.path().join("installs"));
            Project::new(paths, installs, lockfile)
        }

        /// Re-discover config files after one was created.
        fn reopen(&mut self) {
            self.project = Self::open(&self.temp, self.project.lockfile);
        }

        fn root(&self) -> PathBuf {
            self.temp.path().join("project")
        }

        fn lockfile(&self) -> String {
            fs::read_to_string(self.root().join("toolpin.lock")).unwrap()
        }

        fn config_tool(&self, tool: &str) -> Option<String> {
            ConfigFile::load(&self.root().join("toolpin.toml"))
                .unwrap()
                .tool(tool)
                .map(String::from)
        }
    }

    #[test]
    fn use_writes_config_and_lockfile() {
        let fx = Fixture::new(true);
        fx.project.installs().install("tiny", "1.0.0").unwrap();

        let report = fx.project.use_tool("tiny", "1", false).unwrap();

        assert_eq!(report.version, "1.0.0");
        assert_eq!(fx.config_tool("tiny").as_deref(), Some("1"));
        assert_eq!(fx.lockfile().trim(), "[tools]\ntiny = \"1.0.0\"");
    }

    #[test]
    fn install_does_not_refresh_existing_pin() {
        let mut fx = Fixture::new(true);
        fx.project.installs().install("tiny", "1.0.0").unwrap();
        fx.project.use_tool("tiny", "1", false).unwrap();
        fx.reopen();

        let report = fx.project.install("tiny", "1.0.1").unwrap();

        assert_eq!(report.outcome, InstallOutcome::Installed);
        assert_eq!(report.locked, None);
        assert!(fx.lockfile().contains("tiny = \"1.0.0\""));
    }

    #[test]
    fn use_picks_newest_matching_install() {
        let mut fx = Fixture::new(true);
        fx.project.installs().install("tiny", "1.0.0").unwrap();
        fx.project.use_tool("tiny", "1", false).unwrap();
        fx.reopen();
        fx.project.install("tiny", "1.0.1").unwrap();

        let report = fx.project.use_tool("tiny", "1", false).unwrap();

        assert_eq!(report.version, "1.0.1");
        assert!(fx.lockfile().contains("tiny = \"1.0.1\""));
    }

    #[test]
    fn up_re_resolves_within_specifier() {
        let mut fx = Fixture::new(true);
        for v in ["1.0.0", "1.0.1"] {
            fx.project.installs().install("tiny", v).unwrap();
        }
        fx.project.use_tool("tiny", "1", false).unwrap();
        fx.reopen();
        fx.project.installs().install("tiny", "1.1.0").unwrap();
        fx.project.installs().install("tiny", "3.1.0").unwrap();

        let reports = fx.project.upgrade(&["tiny".to_string()], false).unwrap();

        assert_eq!(reports[0].from.as_deref(), Some("1.0.1"));
        assert_eq!(reports[0].to, "1.1.0");
        assert!(reports[0].changed());
        assert_eq!(fx.config_tool("tiny").as_deref(), Some("1"));
        assert!(fx.lockfile().contains("tiny = \"1.1.0\""));
    }

    #[test]
    fn up_bump_rewrites_specifier() {
        let mut fx = Fixture::new(true);
        fx.project.installs().install("tiny", "1.1.0").unwrap();
        fx.project.use_tool("tiny", "1", false).unwrap();
        fx.reopen();
        fx.project.installs().install("tiny", "3.1.0").unwrap();

        let reports = fx.project.upgrade(&[], true).unwrap();

        assert_eq!(reports[0].specifier, "3");
        assert_eq!(reports[0].to, "3.1.0");
        assert_eq!(fx.config_tool("tiny").as_deref(), Some("3"));
        assert_eq!(fx.lockfile().trim(), "[tools]\ntiny = \"3.1.0\"");

        let current = fx.project.current("tiny").unwrap().unwrap();
        assert_eq!(current.requested_version, "3");
        assert_eq!(current.version, "3.1.0");
    }

    #[test]
    fn up_bump_keeps_only_leading_component() {
        let mut fx = Fixture::new(true);
        fs::write(fx.root().join("toolpin.toml"), "[tools]\ntiny = \"1.0\"\n").unwrap();
        fx.reopen();
        fx.project.installs().install("tiny", "1.0.0").unwrap();
        fx.project.installs().install("tiny", "3.1.0").unwrap();

        let reports = fx.project.upgrade(&[], true).unwrap();

        assert_eq!(reports[0].previous_specifier, "1.0");
        assert_eq!(reports[0].specifier, "3");
        assert_eq!(fx.config_tool("tiny").as_deref(), Some("3"));
        assert!(fx.lockfile().contains("tiny = \"3.1.0\""));
    }

    #[test]
    fn up_bump_with_nothing_installed_fails() {
        let mut fx = Fixture::new(true);
        fs::write(fx.root().join("toolpin.toml"), "[tools]\ntiny = \"1\"\n").unwrap();
        fx.reopen();

        let err = fx.project.upgrade(&[], true).unwrap_err();
        assert!(matches!(err, ToolpinError::NoVersionsInstalled { .. }));
    }

    #[test]
    fn uninstall_drops_pin_to_removed_version() {
        let mut fx = Fixture::new(true);
        fx.project.installs().install("tiny", "1.0.0").unwrap();
        fx.project.installs().install("tiny", "1.0.1").unwrap();
        fx.project.use_tool("tiny", "1", false).unwrap();
        fx.reopen();

        assert!(fx.project.uninstall("tiny", "1.0.0").unwrap());
        assert!(fx.lockfile().contains("tiny = \"1.0.1\""));

        assert!(fx.project.uninstall("tiny", "1.0.1").unwrap());
        assert!(!fx.lockfile().contains("tiny"));
        assert_eq!(fx.config_tool("tiny").as_deref(), Some("1"));
    }

    #[test]
    fn up_unknown_tool_fails() {
        let fx = Fixture::new(true);
        let err = fx.project.upgrade(&["nope".to_string()], false).unwrap_err();
        assert!(matches!(err, ToolpinError::ToolNotConfigured { .. }));
    }

    #[test]
    fn use_unresolvable_specifier_writes_nothing() {
        let fx = Fixture::new(true);
        fx.project.installs().install("tiny", "1.0.0").unwrap();

        let err = fx.project.use_tool("tiny", "2", false).unwrap_err();

        assert!(matches!(err, ToolpinError::VersionNotFound { .. }));
        assert!(!fx.root().join("toolpin.toml").exists());
        assert!(!fx.root().join("toolpin.lock").exists());
    }

    #[test]
    fn lockfile_mode_off_leaves_no_lockfile() {
        let fx = Fixture::new(false);
        fx.project.installs().install("tiny", "1.0.0").unwrap();

        let report = fx.project.use_tool("tiny", "1", false).unwrap();

        assert!(report.lockfile_path.is_none());
        assert!(!fx.root().join("toolpin.lock").exists());
    }

    #[test]
    fn current_resolves_live_without_lockfile() {
        let mut fx = Fixture::new(false);
        fx.project.installs().install("tiny", "1.0.0").unwrap();
        fx.project.use_tool("tiny", "1", false).unwrap();
        fx.reopen();
        fx.project.installs().install("tiny", "1.0.1").unwrap();

        let current = fx.project.current("tiny").unwrap().unwrap();
        assert_eq!(current.version, "1.0.1");
        assert!(!current.locked);
        assert!(current.installed);
    }

    #[test]
    fn current_prefers_lockfile_pin() {
        let mut fx = Fixture::new(true);
        fx.project.installs().install("tiny", "1.0.0").unwrap();
        fx.project.use_tool("tiny", "1", false).unwrap();
        fx.reopen();
        fx.project.installs().install("tiny", "1.0.1").unwrap();

        let current = fx.project.current("tiny").unwrap().unwrap();
        assert_eq!(current.version, "1.0.0");
        assert!(current.locked);
    }

    #[test]
    fn current_of_unresolved_tool_reports_specifier() {
        let mut fx = Fixture::new(true);
        fs::write(fx.root().join("toolpin.toml"), "[tools]\ntiny = \"2\"\n").unwrap();
        fx.reopen();

        let current = fx.project.current("tiny").unwrap().unwrap();
        assert_eq!(current.version, "2");
        assert!(!current.installed);
        assert!(fx.project.current("other").unwrap().is_none());
    }

    #[test]
    fn install_pins_declared_tool_without_entry() {
        let mut fx = Fixture::new(true);
        fs::write(fx.root().join("toolpin.toml"), "[tools]\ntiny = \"1\"\n").unwrap();
        fx.reopen();

        let report = fx.project.install("tiny", "1.0.0").unwrap();

        assert_eq!(report.locked.as_deref(), Some("1.0.0"));
        assert_eq!(fx.lockfile().trim(), "[tools]\ntiny = \"1.0.0\"");
    }

    #[test]
    fn install_of_undeclared_tool_writes_no_lockfile() {
        let fx = Fixture::new(true);
        fx.project.install("tiny", "1.0.0").unwrap();
        assert!(!fx.root().join("toolpin.lock").exists());
    }

    #[test]
    fn install_all_uses_pins_and_specifiers() {
        let mut fx = Fixture::new(true);
        fs::write(
            fx.root().join("toolpin.toml"),
            "[tools]\ntiny = \"1.0.0\"\nnode = \"20.1.0\"\n",
        )
        .unwrap();
        fx.reopen();

        let reports = fx.project.install_all().unwrap();

        assert_eq!(reports.len(), 2);
        assert!(fx.project.installs().is_installed("tiny", "1.0.0"));
        assert!(fx.project.installs().is_installed("node", "20.1.0"));
    }

    #[test]
    fn install_request_without_version_needs_declaration() {
        let fx = Fixture::new(false);
        let request = ToolRequest::parse("tiny").unwrap();
        let err = fx.project.install_request(&request).unwrap_err();
        assert!(matches!(err, ToolpinError::ToolNotConfigured { .. }));
    }

    #[test]
    fn where_installed_returns_install_dir() {
        let mut fx = Fixture::new(true);
        fx.project.installs().install("tiny", "1.0.0").unwrap();
        fx.project.use_tool("tiny", "1", false).unwrap();
        fx.reopen();

        let path = fx
            .project
            .where_installed(&ToolRequest::parse("tiny").unwrap())
            .unwrap();
        assert_eq!(path, fx.temp.path().join("installs").join("tiny").join("1.0.0"));

        let err = fx
            .project
            .where_installed(&ToolRequest::parse("tiny@2").unwrap())
            .unwrap_err();
        assert!(matches!(err, ToolpinError::VersionNotFound { .. }));
    }

    #[test]
    fn use_global_writes_global_config() {
        let fx = Fixture::new(false);
        fx.project.installs().install("tiny", "1.0.0").unwrap();

        let report = fx.project.use_tool("tiny", "1", true).unwrap();

        assert_eq!(report.config_path, fx.temp.path().join("global.toml"));
        assert!(!fx.root().join("toolpin.toml").exists());
    }
}
