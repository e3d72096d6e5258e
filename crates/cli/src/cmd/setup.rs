//! Implementation of the `crossbuild setup` command.
//!
//! Prints the manual steps for preparing a cross build directory. Nothing on
//! disk is touched.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crossbuild_lib::CrossbuildConfig;
use crossbuild_lib::platform::paths::default_build_dir;
use crossbuild_lib::setup::setup_instructions;

pub fn cmd_setup(config_path: Option<&Path>, build_dir: Option<PathBuf>) -> Result<()> {
  let config = CrossbuildConfig::load(config_path).context("Failed to load configuration")?;
  let build_dir = build_dir.unwrap_or_else(default_build_dir);

  print!("{}", setup_instructions(&config, &build_dir));
  Ok(())
}
