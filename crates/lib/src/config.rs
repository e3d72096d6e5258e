//! Crossbuild configuration.
//!
//! Values are resolved in layers: built-in defaults, then an optional TOML
//! file, then environment overrides for the two external tool locations.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
  CONFIG_ENV, CONFIG_FILENAME, DEFAULT_IMPORT_ROOT, DEFAULT_ISCC_PATH, DEFAULT_PRODUCT, GO_BINARY_ENV, GOLANG_VERSION,
  ISCC_ENV,
};
use crate::error::{CrossbuildError, Result};
use crate::platform::paths::{config_dir, home_dir};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrossbuildConfig {
  /// Product name used in package identifiers and output file names.
  pub product: String,
  /// Go release installed under `<build_dir>/golang-<go_version>`.
  pub go_version: String,
  /// Go compiler executable.
  pub go_binary: String,
  /// Inno Setup compiler (ISCC.exe).
  pub iscc_path: PathBuf,
  /// Programs ISCC is launched through, e.g. `xvfb-run wine`.
  pub installer_launcher: Vec<String>,
  /// Go import path of the product's source tree.
  pub import_root: String,
}

impl Default for CrossbuildConfig {
  fn default() -> Self {
    Self {
      product: DEFAULT_PRODUCT.to_string(),
      go_version: GOLANG_VERSION.to_string(),
      go_binary: "go".to_string(),
      iscc_path: home_dir().join(DEFAULT_ISCC_PATH),
      installer_launcher: vec!["xvfb-run".to_string(), "wine".to_string()],
      import_root: DEFAULT_IMPORT_ROOT.to_string(),
    }
  }
}

impl CrossbuildConfig {
  /// Load the configuration.
  ///
  /// Priority order for the file layer:
  /// 1. Explicit path, which must exist
  /// 2. `$CROSSBUILD_CONFIG`, which must exist
  /// 3. `<config_dir>/crossbuild/config.toml`, used only when present
  ///
  /// Environment overrides are applied on top of whichever file was read.
  pub fn load(explicit: Option<&Path>) -> Result<Self> {
    let required = explicit
      .map(Path::to_path_buf)
      .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    let mut config = match required {
      Some(path) => {
        if !path.is_file() {
          return Err(CrossbuildError::ConfigNotFound { path });
        }
        Self::from_file(&path)?
      }
      None => {
        let default_path = config_dir().join(CONFIG_FILENAME);
        if default_path.is_file() {
          Self::from_file(&default_path)?
        } else {
          debug!(path = %default_path.display(), "no config file, using defaults");
          Self::default()
        }
      }
    };

    config.apply_env_overrides();
    Ok(config)
  }

  pub fn from_file(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|e| CrossbuildError::ConfigParse {
      path: path.to_path_buf(),
      message: e.to_string(),
    })?;
    debug!(path = %path.display(), "loaded config file");
    Ok(config)
  }

  fn apply_env_overrides(&mut self) {
    if let Ok(go) = std::env::var(GO_BINARY_ENV) {
      self.go_binary = go;
    }
    if let Some(iscc) = std::env::var_os(ISCC_ENV) {
      self.iscc_path = PathBuf::from(iscc);
    }
  }

  /// The `GOROOT` of the cross-compiling toolchain inside `build_dir`.
  pub fn goroot(&self, build_dir: &Path) -> PathBuf {
    build_dir.join(format!("golang-{}", self.go_version))
  }

  /// Installer script directory, relative to `GOPATH`.
  pub fn installer_dir(&self) -> PathBuf {
    Path::new("src")
      .join(&self.import_root)
      .join("scripts")
      .join("win-installer")
  }
}
