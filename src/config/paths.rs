//! Per-OS configuration locations

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumMessage, EnumProperty};

/// Where a configuration lives: machine-wide or per user
///
/// Identifiers match the serde names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, EnumMessage, EnumProperty,
)]
#[serde(rename_all = "lowercase")]
pub enum ConfigurationKind {
    /// Shared by all users (`%ProgramData%`, `/etc/xdg`, `/Library/Application Support`)
    #[strum(message = "Shared by all users", props(identifier = "application"))]
    Application,
    /// Current user only (`%APPDATA%`, `~/.config`, `~/Library/Application Support`)
    #[default]
    #[strum(message = "Current user only", props(identifier = "user"))]
    User,
}

/// Root directory for configurations of `kind`
pub fn base_directory(kind: ConfigurationKind) -> PathBuf {
    match kind {
        ConfigurationKind::User => dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")),
        ConfigurationKind::Application => application_directory(),
    }
}

#[cfg(windows)]
fn application_directory() -> PathBuf {
    std::env::var_os("PROGRAMDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(crate::constants::config::WINDOWS_PROGRAM_DATA))
}

#[cfg(target_os = "macos")]
fn application_directory() -> PathBuf {
    PathBuf::from(crate::constants::config::MACOS_APPLICATION_DIR)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn application_directory() -> PathBuf {
    PathBuf::from(crate::constants::config::UNIX_APPLICATION_DIR)
}

#[cfg(not(any(windows, unix)))]
fn application_directory() -> PathBuf {
    PathBuf::from(".")
}

/// `<base>/<organization>/<app>`; a blank organization is skipped
pub fn configuration_directory(kind: ConfigurationKind, organization: &str, app: &str) -> PathBuf {
    let mut path = base_directory(kind);
    if !organization.trim().is_empty() {
        path.push(organization);
    }
    path.push(app);
    path
}

/// Full path of a configuration file
///
/// The file stem is `name`, or `app` when `name` is blank. `extension`
/// includes the leading dot.
pub fn configuration_filename(
    kind: ConfigurationKind,
    organization: &str,
    app: &str,
    extension: &str,
    name: &str,
) -> PathBuf {
    let stem = if name.trim().is_empty() { app } else { name };
    configuration_directory(kind, organization, app).join(format!("{stem}{extension}"))
}
