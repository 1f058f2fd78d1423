//! Tool versions: parsing, resolution, installs, and lockfiles.
//!
//! - [`version`] - Dotted versions, ordering, and specifier matching
//! - [`request`] - `tool@specifier` arguments
//! - [`installs`] - The on-disk set of installed versions
//! - [`resolver`] - Highest-match resolution
//! - [`lockfile`] - Pinned versions next to each config file
//! - [`project`] - `use`, `install`, `up`, and current-version queries

pub mod installs;
pub mod lockfile;
pub mod project;
pub mod request;
pub mod resolver;
pub mod version;

pub use installs::{InstallOutcome, InstallRecord, InstallStore, INSTALL_RECORD};
pub use lockfile::Lockfile;
pub use project::{CurrentVersion, InstallReport, Project, UpgradeReport, UseReport};
pub use request::ToolRequest;
pub use resolver::{resolve, resolve_latest};
pub use version::{Version, LATEST};
