//! Shared test helpers for CLI integration tests.

use std::fs::File;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

pub const VERSION: &str = "1.2.3";

/// Stand-in for `go install`: writes the binary where the Go toolchain would put it.
pub const FAKE_GO: &str = r#"#!/bin/sh
set -e
[ "$1" = "install" ] || exit 64
name=$(basename "$2")
ext=""
[ "$GOOS" = "windows" ] && ext=".exe"
mkdir -p "$GOPATH/bin/${GOOS}_${GOARCH}"
printf 'MZ' > "$GOPATH/bin/${GOOS}_${GOARCH}/${name}${ext}"
"#;

/// Stand-in for ISCC: requires the script and client binary in the working directory.
pub const FAKE_ISCC: &str = r#"#!/bin/sh
[ -f "$1" ] || exit 3
[ -f juju.exe ] || exit 4
mkdir -p output
printf 'installer' > output/juju-setup-1.2.3.exe
"#;

/// Isolated test environment.
///
/// Each test gets its own home, config, scratch and destination directories.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  fn dir(&self, name: &str) -> PathBuf {
    let p = self.temp.path().join(name);
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Where packages are delivered.
  pub fn dest_path(&self) -> PathBuf {
    self.dir("dest")
  }

  /// `TMPDIR` of the binary under test; workspaces are created here.
  pub fn scratch_path(&self) -> PathBuf {
    self.dir("scratch")
  }

  /// A `juju-core_1.2.3.tar.gz` source tarball with the installer script in place.
  pub fn source_tarball(&self) -> PathBuf {
    let top = format!("juju-core_{}", VERSION);
    let path = self.temp.path().join(format!("{}.tar.gz", top));
    let encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let files = [
      (
        format!("{}/src/github.com/juju/juju/scripts/win-installer/setup.iss", top),
        "[Setup]\n",
      ),
      (format!("{}/src/github.com/juju/juju/cmd/juju/main.go", top), "package main\n"),
    ];
    for (name, content) in &files {
      let mut header = tar::Header::new_gnu();
      header.set_size(content.len() as u64);
      header.set_mode(0o644);
      builder.append_data(&mut header, name, content.as_bytes()).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
    path
  }

  /// Write an executable shell script.
  #[cfg(unix)]
  pub fn write_script(&self, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = self.dir("bin").join(name);
    std::fs::write(&path, body).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  /// Write a config file that runs ISCC directly from `iscc`.
  pub fn write_config(&self, iscc: &Path) -> PathBuf {
    let path = self.temp.path().join("crossbuild.toml");
    let content = format!("installer_launcher = []\niscc_path = '{}'\n", iscc.display());
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Get a pre-configured Command for the crossbuild binary.
  ///
  /// Sets environment variables for isolated testing:
  /// - `HOME`, `XDG_CONFIG_HOME`: no user config is picked up
  /// - `TMPDIR`: workspaces land in `scratch_path()`
  /// - `CROSSBUILD_*` removed so the host's overrides don't leak in
  pub fn crossbuild_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("crossbuild");
    cmd.current_dir(self.temp.path());
    cmd.env("HOME", self.dir("home"));
    cmd.env("XDG_CONFIG_HOME", self.dir("config"));
    cmd.env("TMPDIR", self.scratch_path());
    cmd.env_remove("CROSSBUILD_CONFIG");
    cmd.env_remove("CROSSBUILD_GO");
    cmd.env_remove("CROSSBUILD_ISCC");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

/// Names of the entries directly inside `dir`, sorted.
pub fn dir_listing(dir: &Path) -> Vec<String> {
  let mut names: Vec<String> = std::fs::read_dir(dir)
    .unwrap()
    .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
    .collect();
  names.sort();
  names
}

/// Entry names of a gzip tarball.
pub fn tarball_entries(path: &Path) -> Vec<String> {
  let decoder = flate2::read::GzDecoder::new(File::open(path).unwrap());
  let mut archive = tar::Archive::new(decoder);
  archive
    .entries()
    .unwrap()
    .map(|e| e.unwrap().path().unwrap().to_string_lossy().to_string())
    .collect()
}
