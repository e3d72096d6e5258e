//! Test utilities for crossbuild-lib.
//!
//! Provides a command runner that records what it was asked to run and lets
//! a test script the side effects, plus helpers for building source tarballs.

use std::cell::RefCell;
use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::error::Result;
use crate::exec::{CommandOutput, CommandRunner, CommandSpec};

type Handler = Box<dyn Fn(&CommandSpec) -> CommandOutput>;

/// A [`CommandRunner`] that records every command and answers through a handler.
pub struct RecordingRunner {
  calls: RefCell<Vec<CommandSpec>>,
  handler: Handler,
}

impl RecordingRunner {
  pub fn new(handler: impl Fn(&CommandSpec) -> CommandOutput + 'static) -> Self {
    Self {
      calls: RefCell::new(Vec::new()),
      handler: Box::new(handler),
    }
  }

  /// Every command exits zero without doing anything.
  pub fn succeeding() -> Self {
    Self::new(|_| ok_output())
  }

  pub fn calls(&self) -> Vec<CommandSpec> {
    self.calls.borrow().clone()
  }
}

impl CommandRunner for RecordingRunner {
  fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
    self.calls.borrow_mut().push(command.clone());
    Ok((self.handler)(command))
  }
}

pub fn ok_output() -> CommandOutput {
  CommandOutput {
    code: Some(0),
    success: true,
    output: String::new(),
  }
}

pub fn failed_output(code: i32, output: &str) -> CommandOutput {
  CommandOutput {
    code: Some(code),
    success: false,
    output: output.to_string(),
  }
}

/// Write a gzip tarball at `dir/file_name` containing `files` (relative path, content).
pub fn write_tarball(dir: &Path, file_name: &str, files: &[(&str, &str)]) -> PathBuf {
  let path = dir.join(file_name);
  let encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
  let mut builder = tar::Builder::new(encoder);

  for (name, content) in files {
    let mut header = tar::Header::new_gnu();
    header.set_size(content.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder.append_data(&mut header, name, content.as_bytes()).unwrap();
  }

  builder.into_inner().unwrap().finish().unwrap();
  path
}

/// A juju-style source tarball: `juju-core_<version>/...` with the installer script present.
pub fn source_tarball(dir: &Path, version: &str) -> PathBuf {
  let top = format!("juju-core_{}", version);
  let iss = format!("{}/src/github.com/juju/juju/scripts/win-installer/setup.iss", top);
  let main = format!("{}/src/github.com/juju/juju/cmd/juju/main.go", top);
  write_tarball(
    dir,
    &format!("{}.tar.gz", top),
    &[(iss.as_str(), "[Setup]\n"), (main.as_str(), "package main\n")],
  )
}

/// Entry names of a gzip tarball, in archive order.
pub fn tarball_entries(path: &Path) -> Vec<String> {
  let decoder = flate2::read::GzDecoder::new(File::open(path).unwrap());
  let mut archive = tar::Archive::new(decoder);
  archive
    .entries()
    .unwrap()
    .map(|e| e.unwrap().path().unwrap().to_string_lossy().to_string())
    .collect()
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
