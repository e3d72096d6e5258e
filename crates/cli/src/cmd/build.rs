//! Implementation of the `win-client`, `win-agent` and `osx-client` commands.
//!
//! Each extracts the source tarball into a temporary workspace, cross-compiles
//! the target's package and places the packaged result in the destination
//! directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crossbuild_lib::platform::paths::default_build_dir;
use crossbuild_lib::{BuildRequest, CrossbuildConfig, Pipeline, SystemRunner, TargetKind};

use crate::output::{OutputFormat, print_build_report, print_json};

pub struct BuildOptions {
  pub target: TargetKind,
  pub tarball: PathBuf,
  pub build_dir: Option<PathBuf>,
  pub dest_dir: Option<PathBuf>,
  pub config: Option<PathBuf>,
  pub dry_run: bool,
  pub format: OutputFormat,
}

/// Execute a build command.
///
/// Prints a summary of the package output: its path, and unless this was a
/// dry run, its size and SHA256 digest.
pub fn cmd_build(options: &BuildOptions) -> Result<()> {
  let config = CrossbuildConfig::load(options.config.as_deref()).context("Failed to load configuration")?;
  debug!(?config, "resolved configuration");

  let dest_dir = match &options.dest_dir {
    Some(dir) => dir.clone(),
    None => std::env::current_dir().context("Failed to determine current directory")?,
  };
  let dest_dir = dunce::canonicalize(&dest_dir).unwrap_or(dest_dir);

  let request = BuildRequest {
    target: options.target,
    tarball: options.tarball.clone(),
    build_dir: options.build_dir.clone().unwrap_or_else(default_build_dir),
    dest_dir,
  };

  let runner = SystemRunner;
  let report = Pipeline::new(&config, &runner)
    .dry_run(options.dry_run)
    .run(&request)
    .with_context(|| format!("Failed to build {}", options.target))?;

  if options.format.is_json() {
    return print_json(&report);
  }

  print_build_report(&report);
  Ok(())
}
