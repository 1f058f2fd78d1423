//! Highest-match version resolution.

use crate::error::{Result, ToolpinError};

use super::version::Version;

/// Resolve a specifier to the highest installed version it matches.
///
/// `installed` need not be sorted.
pub fn resolve(tool: &str, specifier: &str, installed: &[Version]) -> Result<Version> {
    installed
        .iter()
        .filter(|v| v.matches(specifier))
        .max()
        .cloned()
        .ok_or_else(|| ToolpinError::VersionNotFound {
            tool: tool.to_string(),
            specifier: specifier.to_string(),
        })
}

/// Resolve to the highest installed version, ignoring any specifier.
pub fn resolve_latest(tool: &str, installed: &[Version]) -> Result<Version> {
    installed
        .iter()
        .max()
        .cloned()
        .ok_or_else(|| ToolpinError::NoVersionsInstalled {
            tool: tool.to_string(),
        })
}
