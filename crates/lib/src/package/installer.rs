//! Windows installer packaging via the Inno Setup compiler.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::CrossbuildConfig;
use crate::consts::{INSTALLER_OUTPUT_DIR, INSTALLER_SCRIPT};
use crate::error::{CrossbuildError, Result};
use crate::exec::{CommandSpec, Executor};
use crate::package::{PackageOutput, WorkingDirGuard, relocate};

/// `<product>-setup-<version>.exe`
pub fn installer_name(product: &str, version: &str) -> String {
  format!("{}-setup-{}.exe", product, version)
}

/// The ISCC invocation, wrapped in the configured launcher (`xvfb-run wine` by default).
pub fn installer_command(config: &CrossbuildConfig) -> CommandSpec {
  let iscc = config.iscc_path.to_string_lossy().to_string();
  let spec = match config.installer_launcher.split_first() {
    Some((launcher, rest)) => rest
      .iter()
      .fold(CommandSpec::new(launcher), |spec, arg| spec.arg(arg))
      .arg(iscc),
    None => CommandSpec::new(iscc),
  };
  spec.arg(INSTALLER_SCRIPT)
}

/// Build the client installer and move it into `dest_dir`.
///
/// The built binary is moved into the installer directory of the source
/// tree, ISCC runs with that directory as the working directory, and the
/// produced installer is moved from its `output` subdirectory to
/// `dest_dir`.
pub fn make_installer(
  executor: &Executor<'_>,
  config: &CrossbuildConfig,
  artifact: &Path,
  gopath: &Path,
  version: &str,
  dest_dir: &Path,
) -> Result<PackageOutput> {
  let iss_dir = gopath.join(config.installer_dir());
  let name = installer_name(&config.product, version);
  let produced = iss_dir.join(INSTALLER_OUTPUT_DIR).join(&name);
  let dest = dest_dir.join(&name);
  let command = installer_command(config);

  if executor.is_dry_run() {
    info!(
      artifact = %artifact.display(),
      dir = %iss_dir.display(),
      "dry run: would move binary into installer directory"
    );
    executor.execute(&command)?;
    info!(from = %produced.display(), to = %dest.display(), "dry run: would move installer");
    return Ok(PackageOutput::planned(dest));
  }

  let Some(binary_name) = artifact.file_name().filter(|_| artifact.is_file()) else {
    return Err(CrossbuildError::ArtifactMissing {
      path: artifact.to_path_buf(),
    });
  };
  if !iss_dir.is_dir() {
    return Err(CrossbuildError::ArtifactMissing { path: iss_dir });
  }

  relocate(artifact, &iss_dir.join(binary_name))?;

  let output = {
    let _cwd = WorkingDirGuard::enter(&iss_dir)?;
    executor.execute(&command)?
  };

  if !output.success {
    return Err(CrossbuildError::PackagingFailed {
      cmd: command.to_string(),
      code: output.code,
      output: output.output,
    });
  }

  if !produced.is_file() {
    return Err(CrossbuildError::ArtifactMissing { path: produced });
  }

  fs::create_dir_all(dest_dir)?;
  relocate(&produced, &dest)?;
  info!(path = %dest.display(), "installer ready");

  Ok(PackageOutput::written(dest)?)
}
