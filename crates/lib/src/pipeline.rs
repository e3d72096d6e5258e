//! Pipeline coordination: workspace, compile, package.
//!
//! Each run moves through `Start → WorkspaceAcquired → Compiled → Packaged →
//! Done`. Any failure aborts the remaining stages; the workspace is removed
//! before the error reaches the caller.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{error, info};

use crate::compile::{GoEnv, cross_compile};
use crate::config::CrossbuildConfig;
use crate::error::{CrossbuildError, Result};
use crate::exec::{CommandRunner, Executor};
use crate::package::{PackageOutput, agent_tarball_name, make_agent_tarball, make_installer};
use crate::target::{BuildTarget, Packaging, TargetKind};
use crate::workspace::{Workspace, WorkspaceManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Start,
  WorkspaceAcquired,
  Compiled,
  Packaged,
  Done,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Stage::Start => "start",
      Stage::WorkspaceAcquired => "workspace-acquired",
      Stage::Compiled => "compiled",
      Stage::Packaged => "packaged",
      Stage::Done => "done",
    };
    write!(f, "{}", name)
  }
}

/// What to build and where things live.
#[derive(Debug, Clone)]
pub struct BuildRequest {
  pub target: TargetKind,
  /// Source tarball, e.g. `juju-core_1.2.3.tar.gz`.
  pub tarball: PathBuf,
  /// Directory holding the cross-compiling Go toolchain.
  pub build_dir: PathBuf,
  /// Where the package output is placed.
  pub dest_dir: PathBuf,
}

/// Result of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
  pub target: TargetKind,
  pub version: String,
  pub dry_run: bool,
  pub output: PackageOutput,
}

pub struct Pipeline<'a> {
  config: &'a CrossbuildConfig,
  runner: &'a dyn CommandRunner,
  workspaces: WorkspaceManager,
  dry_run: bool,
}

impl<'a> Pipeline<'a> {
  pub fn new(config: &'a CrossbuildConfig, runner: &'a dyn CommandRunner) -> Self {
    Self {
      config,
      runner,
      workspaces: WorkspaceManager::new(),
      dry_run: false,
    }
  }

  pub fn dry_run(mut self, dry_run: bool) -> Self {
    self.dry_run = dry_run;
    self
  }

  pub fn workspaces(mut self, workspaces: WorkspaceManager) -> Self {
    self.workspaces = workspaces;
    self
  }

  /// Build, package and deliver one target.
  pub fn run(&self, request: &BuildRequest) -> Result<BuildReport> {
    let target = BuildTarget::new(request.target, self.config);
    info!(
      stage = %Stage::Start,
      target = %target.kind,
      platform = %target.platform,
      dry_run = self.dry_run,
      "starting build"
    );

    let result = self
      .workspaces
      .with_workspace(&request.tarball, |workspace| self.build_in(workspace, &target, request));

    match result {
      Ok(report) => {
        info!(stage = %Stage::Done, target = %target.kind, path = %report.output.path.display(), "build finished");
        Ok(report)
      }
      Err(err) => {
        error!(target = %target.kind, error = %err, "build failed");
        Err(err)
      }
    }
  }

  fn build_in(&self, workspace: &Workspace, target: &BuildTarget, request: &BuildRequest) -> Result<BuildReport> {
    info!(stage = %Stage::WorkspaceAcquired, version = %workspace.version(), gopath = %workspace.gopath().display());

    let executor = Executor::new(self.runner, self.dry_run);
    let env = GoEnv {
      goroot: self.config.goroot(&request.build_dir),
      gopath: workspace.gopath().to_path_buf(),
      platform: target.platform,
    };
    cross_compile(&executor, &self.config.go_binary, &target.package, &env)?;
    info!(stage = %Stage::Compiled, package = %target.package);

    let artifact = target.artifact_path(workspace.gopath());
    let version = workspace.version();
    let output = match target.packaging {
      Packaging::Installer => make_installer(
        &executor,
        self.config,
        &artifact,
        workspace.gopath(),
        version,
        &request.dest_dir,
      )?,
      Packaging::AgentTarball => make_agent_tarball(
        &executor,
        &artifact,
        &target.binary,
        &agent_tarball_name(&self.config.product, version),
        &request.dest_dir,
      )?,
      Packaging::Unsupported => {
        return Err(CrossbuildError::NotImplemented {
          what: format!("packaging for {} ({})", target.kind, target.platform),
        });
      }
    };
    info!(stage = %Stage::Packaged, path = %output.path.display());

    Ok(BuildReport {
      target: target.kind,
      version: version.to_string(),
      dry_run: self.dry_run,
      output,
    })
  }
}
