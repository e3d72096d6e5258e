//! Packaging built binaries into deliverables.
//!
//! Two variants exist: an Inno Setup installer for the Windows client and a
//! gzip tarball for the Windows agent. Both skip every side effect in a dry
//! run and report the output they would have produced.

pub mod cwd;
pub mod installer;
pub mod tarball;

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::util::hash::{ContentHash, hash_file};

pub use cwd::WorkingDirGuard;
pub use installer::{installer_command, installer_name, make_installer};
pub use tarball::{agent_tarball_name, make_agent_tarball};

/// A final installer or archive in the destination directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageOutput {
  pub path: PathBuf,
  /// `None` for outputs that were only planned (dry run).
  pub sha256: Option<ContentHash>,
  pub size: Option<u64>,
}

impl PackageOutput {
  pub fn planned(path: PathBuf) -> Self {
    Self {
      path,
      sha256: None,
      size: None,
    }
  }

  pub fn written(path: PathBuf) -> io::Result<Self> {
    let sha256 = hash_file(&path)?;
    let size = fs::metadata(&path)?.len();
    Ok(Self {
      path,
      sha256: Some(sha256),
      size: Some(size),
    })
  }

  pub fn is_planned(&self) -> bool {
    self.sha256.is_none()
  }
}

/// Move `from` to `to`, copying across filesystems when rename cannot.
///
/// `to` either appears complete or not at all.
pub(crate) fn relocate(from: &Path, to: &Path) -> io::Result<()> {
  match fs::rename(from, to) {
    Ok(()) => {
      debug!(from = %from.display(), to = %to.display(), "moved");
      Ok(())
    }
    Err(err) => {
      debug!(from = %from.display(), error = %err, "rename failed, copying instead");
      copy_staged(from, to)
    }
  }
}

/// Copy `from` into a temporary file beside `to`, rename it into place, then
/// remove `from`.
///
/// Once `to` is in place the move counts as done: a source that cannot be
/// removed is only logged.
pub(crate) fn copy_staged(from: &Path, to: &Path) -> io::Result<()> {
  let dir = to
    .parent()
    .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "destination has no parent directory"))?;

  let mut source = File::open(from)?;
  let mut staging = NamedTempFile::new_in(dir)?;
  io::copy(&mut source, staging.as_file_mut())?;
  staging.as_file().sync_all()?;
  staging.as_file().set_permissions(source.metadata()?.permissions())?;
  staging.persist(to).map_err(|e| e.error)?;
  debug!(from = %from.display(), to = %to.display(), "copied across filesystems");

  if let Err(err) = fs::remove_file(from) {
    warn!(path = %from.display(), error = %err, "failed to remove source after copy");
  }
  Ok(())
}
