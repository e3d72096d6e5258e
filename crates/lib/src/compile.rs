//! Cross-compilation through the Go toolchain.

use std::path::PathBuf;

use tracing::info;

use crate::error::{CrossbuildError, Result};
use crate::exec::{CommandSpec, Executor};
use crate::platform::Platform;

/// Toolchain selection for one `go install`.
///
/// All four variables are always set together on the child process; the
/// parent environment is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoEnv {
  pub goroot: PathBuf,
  pub gopath: PathBuf,
  pub platform: Platform,
}

impl GoEnv {
  pub fn vars(&self) -> [(&'static str, String); 4] {
    [
      ("GOROOT", self.goroot.to_string_lossy().to_string()),
      ("GOPATH", self.gopath.to_string_lossy().to_string()),
      ("GOARCH", self.platform.arch.as_str().to_string()),
      ("GOOS", self.platform.os.as_str().to_string()),
    ]
  }
}

/// Build the `go install <package>` command, run from inside `GOPATH`.
pub fn go_install_command(go_binary: &str, package: &str, env: &GoEnv) -> CommandSpec {
  env
    .vars()
    .into_iter()
    .fold(CommandSpec::new(go_binary).arg("install").arg(package), |spec, (key, value)| {
      spec.env(key, value)
    })
    .current_dir(&env.gopath)
}

/// Cross-compile `package` for `env.platform`.
pub fn cross_compile(executor: &Executor<'_>, go_binary: &str, package: &str, env: &GoEnv) -> Result<()> {
  let command = go_install_command(go_binary, package, env);
  let output = executor.execute(&command)?;

  if !output.success {
    return Err(CrossbuildError::CompileFailed {
      package: package.to_string(),
      code: output.code,
      output: output.output,
    });
  }

  info!(package = %package, platform = %env.platform, "compiled");
  Ok(())
}
