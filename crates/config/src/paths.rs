//! Path helpers for platform configuration locations.
//!
//! Responsibilities:
//! - Determine the per-user configuration directory for an application.
//! - Use `directories` crate for platform-appropriate paths.
//!
//! Does NOT handle:
//! - File I/O operations.
//! - Searching directories (see `loader/file.rs`).

use std::path::PathBuf;

/// Returns the platform configuration directory for `app_name`.
///
/// - Linux: `$XDG_CONFIG_HOME/<app_name>` or `~/.config/<app_name>`
/// - macOS: `~/Library/Application Support/<app_name>`
/// - Windows: `%AppData%\<app_name>\config`
///
/// Returns `None` when no home directory can be determined.
pub fn user_config_dir(app_name: &str) -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", app_name).map(|dirs| dirs.config_dir().to_path_buf())
}
