use std::path::PathBuf;

use crate::consts::APP_NAME;

/// Returns the user's home directory, or the current directory if it cannot be determined
pub fn home_dir() -> PathBuf {
  dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the directory for configuration files for the application
pub fn config_dir() -> PathBuf {
  dirs::config_dir()
    .unwrap_or_else(|| home_dir().join(".config"))
    .join(APP_NAME)
}

/// Returns the default cross build directory (`~/crossbuild`)
pub fn default_build_dir() -> PathBuf {
  home_dir().join(APP_NAME)
}
