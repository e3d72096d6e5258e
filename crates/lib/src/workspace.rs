//! Ephemeral workspaces extracted from source tarballs.
//!
//! A [`Workspace`] owns a temporary directory holding one extracted source
//! tarball. The directory is removed when the workspace is closed, or on drop
//! if the owner unwinds before closing it. [`WorkspaceManager::with_workspace`]
//! scopes a workspace to a closure and is the only way the pipeline uses one.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::consts::APP_NAME;
use crate::error::{CrossbuildError, Result};

const ARCHIVE_SUFFIXES: &[&str] = &[".tar.gz", ".tgz"];

/// An extracted source tree in a private temporary directory.
#[derive(Debug)]
pub struct Workspace {
  dir: TempDir,
  gopath: PathBuf,
  version: String,
}

impl Workspace {
  /// The temporary directory backing this workspace.
  pub fn root(&self) -> &Path {
    self.dir.path()
  }

  /// The archive's top-level directory, used as `GOPATH`.
  pub fn gopath(&self) -> &Path {
    &self.gopath
  }

  pub fn version(&self) -> &str {
    &self.version
  }

  /// Remove the backing directory, reporting failures.
  pub fn close(self) -> Result<()> {
    let root = self.dir.path().to_path_buf();
    self.dir.close()?;
    debug!(path = %root.display(), "removed workspace");
    Ok(())
  }
}

/// Creates workspaces under a scratch directory.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceManager {
  scratch: Option<PathBuf>,
}

impl WorkspaceManager {
  /// Workspaces are created in the system temporary directory.
  pub fn new() -> Self {
    Self::default()
  }

  /// Workspaces are created inside `dir`.
  pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
    Self {
      scratch: Some(dir.into()),
    }
  }

  /// Extract `archive` into a fresh workspace.
  ///
  /// The archive is scanned in full before anything is written, so an
  /// unreadable or corrupt archive fails with `InvalidArchive` without
  /// creating a directory.
  pub fn open(&self, archive: &Path) -> Result<Workspace> {
    let top_level = scan_archive(archive)?;
    let version = parse_version(&top_level)?;

    let prefix = format!("{}-", APP_NAME);
    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix);
    let dir = match &self.scratch {
      Some(scratch) => builder.tempdir_in(scratch)?,
      None => builder.tempdir()?,
    };

    let file = File::open(archive)?;
    let mut tar = Archive::new(GzDecoder::new(BufReader::new(file)));
    tar.set_preserve_permissions(true);
    tar.unpack(dir.path()).map_err(|e| invalid(archive, e))?;

    let gopath = dir.path().join(&top_level);
    info!(
      archive = %archive.display(),
      workspace = %dir.path().display(),
      version = %version,
      "extracted source tarball"
    );

    Ok(Workspace { dir, gopath, version })
  }

  /// Run `f` against a workspace extracted from `archive`.
  ///
  /// The workspace is removed before this returns, whether `f` succeeded or
  /// failed. When both `f` and the removal fail, the error from `f` wins.
  pub fn with_workspace<T, F>(&self, archive: &Path, f: F) -> Result<T>
  where
    F: FnOnce(&Workspace) -> Result<T>,
  {
    let workspace = self.open(archive)?;
    let result = f(&workspace);
    let closed = workspace.close();

    match (result, closed) {
      (Ok(value), Ok(())) => Ok(value),
      (Ok(_), Err(err)) => Err(err),
      (Err(err), Ok(())) => Err(err),
      (Err(err), Err(cleanup)) => {
        warn!(error = %cleanup, "failed to remove workspace");
        Err(err)
      }
    }
  }
}

fn invalid(archive: &Path, message: impl ToString) -> CrossbuildError {
  CrossbuildError::InvalidArchive {
    path: archive.to_path_buf(),
    message: message.to_string(),
  }
}

/// Read every entry header of a gzip tarball and return its single top-level directory name.
fn scan_archive(archive: &Path) -> Result<String> {
  let file = File::open(archive).map_err(|e| invalid(archive, e))?;
  let mut tar = Archive::new(GzDecoder::new(BufReader::new(file)));

  // top-level name -> whether it is known to be a directory
  let mut top_level: BTreeMap<String, bool> = BTreeMap::new();
  let mut count = 0usize;

  for entry in tar.entries().map_err(|e| invalid(archive, e))? {
    let entry = entry.map_err(|e| invalid(archive, e))?;
    let path = entry.path().map_err(|e| invalid(archive, e))?;
    count += 1;

    let mut components = path.components().filter(|c| !matches!(c, Component::CurDir));
    match components.next() {
      Some(Component::Normal(name)) => {
        let is_dir = entry.header().entry_type().is_dir() || components.next().is_some();
        *top_level.entry(name.to_string_lossy().to_string()).or_default() |= is_dir;
      }
      Some(_) => return Err(invalid(archive, format!("unsafe entry path: {}", path.display()))),
      None => {}
    }
  }

  if count == 0 {
    return Err(invalid(archive, "archive has no entries"));
  }

  let mut names = top_level.into_iter();
  match (names.next(), names.next()) {
    (Some((name, true)), None) => Ok(name),
    (Some((name, false)), None) => Err(CrossbuildError::MalformedArchiveName {
      name,
      reason: "top-level entry is not a directory".to_string(),
    }),
    (Some((first, _)), Some((second, _))) => Err(CrossbuildError::MalformedArchiveName {
      name: archive.display().to_string(),
      reason: format!("expected a single top-level directory, found '{}' and '{}'", first, second),
    }),
    (None, _) => Err(invalid(archive, "archive has no named entries")),
  }
}

/// Derive the version from a top-level entry name like `juju-core_1.2.3`.
///
/// A `.tar.gz`/`.tgz` suffix is stripped first; the version is the last
/// `_`-delimited token and must not be empty.
pub fn parse_version(name: &str) -> Result<String> {
  let stem = ARCHIVE_SUFFIXES
    .iter()
    .find_map(|suffix| name.strip_suffix(suffix))
    .unwrap_or(name);

  let malformed = |reason: &str| CrossbuildError::MalformedArchiveName {
    name: name.to_string(),
    reason: reason.to_string(),
  };

  match stem.rsplit_once('_') {
    Some((_, version)) if !version.is_empty() => Ok(version.to_string()),
    Some(_) => Err(malformed("empty version after '_'")),
    None => Err(malformed("expected '<name>_<version>'")),
  }
}
