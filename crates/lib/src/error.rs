//! Error types for crossbuild pipelines.
//!
//! Every variant is terminal for the invocation that raised it; nothing in
//! this crate retries.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building and packaging a target.
#[derive(Debug, Error)]
pub enum CrossbuildError {
  /// The input file is not a readable gzip-compressed tar archive.
  #[error("not a tar.gz: {}: {message}", .path.display())]
  InvalidArchive { path: PathBuf, message: String },

  /// The archive's top-level entry does not carry a `<name>_<version>` name.
  #[error("malformed archive name '{name}': {reason}")]
  MalformedArchiveName { name: String, reason: String },

  /// The Go toolchain exited non-zero.
  #[error("go install {package} failed with exit code {code:?}:\n{output}")]
  CompileFailed {
    package: String,
    code: Option<i32>,
    output: String,
  },

  /// The packaging tool exited non-zero.
  #[error("packaging command failed with exit code {code:?}: {cmd}\n{output}")]
  PackagingFailed {
    cmd: String,
    code: Option<i32>,
    output: String,
  },

  /// A file the pipeline expected to exist was not produced.
  #[error("expected artifact is missing: {}", .path.display())]
  ArtifactMissing { path: PathBuf },

  #[error("{what} is not implemented")]
  NotImplemented { what: String },

  /// An external program could not be started at all.
  #[error("failed to start {program}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  #[error("config file not found: {}", .path.display())]
  ConfigNotFound { path: PathBuf },

  #[error("failed to parse config {}: {message}", .path.display())]
  ConfigParse { path: PathBuf, message: String },

  #[error("io error: {0}")]
  Io(#[from] io::Error),
}

/// Result type for crossbuild operations.
pub type Result<T> = std::result::Result<T, CrossbuildError>;
