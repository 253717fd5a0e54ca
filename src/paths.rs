//! Per-user config and data directory resolution.

use std::path::PathBuf;

pub const APP_DIR: &str = "edit_bridge";
pub const PERMISSION_CONFIG_FILE: &str = "edit_bridge.json";
pub const SIDE_LOG_DIR: &str = "bridge-logs";

/// Path of the JSON config file the mode gate reads.
#[must_use]
pub fn permission_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(PERMISSION_CONFIG_FILE))
}

/// Directory holding append-only diagnostic logs.
#[must_use]
pub fn side_log_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join(SIDE_LOG_DIR))
}

/// Full path for a named side log file.
#[must_use]
pub fn side_log_path(file_name: &str) -> Option<PathBuf> {
    side_log_dir().map(|dir| dir.join(file_name))
}
