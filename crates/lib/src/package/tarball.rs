//! Agent tarball packaging.

use std::fs;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{Builder, HeaderMode};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{CrossbuildError, Result};
use crate::exec::Executor;
use crate::package::PackageOutput;

/// `<product>-<version>-win2012-amd64.tgz`
pub fn agent_tarball_name(product: &str, version: &str) -> String {
  format!("{}-{}-win2012-amd64.tgz", product, version)
}

/// Write `artifact` into a new gzip tarball `dest_dir/name` as its only entry, `entry_name`.
///
/// The tarball is assembled in a temporary file next to its destination and
/// renamed into place once complete, so a failure leaves `dest_dir` as it was.
pub fn make_agent_tarball(
  executor: &Executor<'_>,
  artifact: &Path,
  entry_name: &str,
  name: &str,
  dest_dir: &Path,
) -> Result<PackageOutput> {
  let dest = dest_dir.join(name);

  if executor.is_dry_run() {
    info!(artifact = %artifact.display(), tarball = %dest.display(), "dry run: would write agent tarball");
    return Ok(PackageOutput::planned(dest));
  }

  if !artifact.is_file() {
    return Err(CrossbuildError::ArtifactMissing {
      path: artifact.to_path_buf(),
    });
  }

  fs::create_dir_all(dest_dir)?;
  let staging = NamedTempFile::new_in(dest_dir)?;

  {
    let encoder = GzEncoder::new(staging.as_file(), Compression::default());
    let mut builder = Builder::new(encoder);
    builder.mode(HeaderMode::Deterministic);
    builder.append_path_with_name(artifact, entry_name)?;
    builder.into_inner()?.finish()?;
  }

  staging.persist(&dest).map_err(|e| e.error)?;
  info!(path = %dest.display(), "agent tarball ready");

  Ok(PackageOutput::written(dest)?)
}
