//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/muta/`
//! - macOS: `~/Library/Application Support/muta/`
//! - Windows: `%APPDATA%\muta\`

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "muta";

/// File name of the settings file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the user settings file, whether or not it exists.
pub fn user_config_file() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}
