//! The fixed set of cross-build targets.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::CrossbuildConfig;
use crate::platform::Platform;
use crate::platform::arch::Arch;
use crate::platform::os::Os;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
  /// Windows 386 client, shipped as an installer.
  WinClient,
  /// Windows amd64 agent, shipped as a tarball.
  WinAgent,
  /// macOS amd64 client; packaging is not implemented.
  OsxClient,
}

impl TargetKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::WinClient => "win-client",
      Self::WinAgent => "win-agent",
      Self::OsxClient => "osx-client",
    }
  }
}

impl fmt::Display for TargetKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// How a built binary becomes a package output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packaging {
  Installer,
  AgentTarball,
  Unsupported,
}

/// One cross-compilation job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
  pub kind: TargetKind,
  pub platform: Platform,
  /// Go package passed to `go install`.
  pub package: String,
  /// File name `go install` gives the binary.
  pub binary: String,
  pub packaging: Packaging,
}

impl BuildTarget {
  pub fn new(kind: TargetKind, config: &CrossbuildConfig) -> Self {
    let product = &config.product;
    let cmd = |name: &str| format!("{}/cmd/{}", config.import_root, name);

    match kind {
      TargetKind::WinClient => Self {
        kind,
        platform: Platform::new(Os::Windows, Arch::I386),
        package: cmd(product),
        binary: format!("{}.exe", product),
        packaging: Packaging::Installer,
      },
      TargetKind::WinAgent => Self {
        kind,
        platform: Platform::new(Os::Windows, Arch::Amd64),
        package: cmd(&format!("{}d", product)),
        binary: format!("{}d.exe", product),
        packaging: Packaging::AgentTarball,
      },
      TargetKind::OsxClient => Self {
        kind,
        platform: Platform::new(Os::Darwin, Arch::Amd64),
        package: cmd(product),
        binary: product.clone(),
        packaging: Packaging::Unsupported,
      },
    }
  }

  /// Where `go install` leaves the binary when cross-compiling into `gopath`.
  pub fn artifact_path(&self, gopath: &Path) -> PathBuf {
    gopath
      .join("bin")
      .join(self.platform.go_install_dir())
      .join(&self.binary)
  }
}
