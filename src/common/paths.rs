//! Settings file location
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `~/.config/endpoint-validator/`
//! - macOS: `~/Library/Application Support/endpoint-validator/`
//! - Windows: `%APPDATA%\endpoint-validator\`

use std::path::PathBuf;

const APP_NAME: &str = "endpoint-validator";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the user settings file
pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
