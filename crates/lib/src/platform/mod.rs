pub mod arch;
pub mod os;
pub mod paths;

use arch::Arch;
use os::Os;
use std::fmt;

/// Cross-compilation platform (e.g., "windows/386")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub os: Os,
  pub arch: Arch,
}

impl Platform {
  pub fn new(os: Os, arch: Arch) -> Self {
    Self { os, arch }
  }

  /// Returns the directory name `go install` uses under `$GOPATH/bin` when
  /// cross-compiling (e.g., "windows_386").
  pub fn go_install_dir(&self) -> String {
    format!("{}_{}", self.os, self.arch)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.os, self.arch)
  }
}
