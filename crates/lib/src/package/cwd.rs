//! Scoped change of the process working directory.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Switches the process working directory and restores it on drop.
///
/// The working directory is process-global; hold the guard only for the
/// single step that needs it.
#[derive(Debug)]
pub struct WorkingDirGuard {
  saved: PathBuf,
}

impl WorkingDirGuard {
  pub fn enter(path: &Path) -> io::Result<Self> {
    let saved = env::current_dir()?;
    env::set_current_dir(path)?;
    debug!(from = %saved.display(), to = %path.display(), "changed working directory");
    Ok(Self { saved })
  }
}

impl Drop for WorkingDirGuard {
  fn drop(&mut self) {
    if let Err(err) = env::set_current_dir(&self.saved) {
      warn!(path = %self.saved.display(), error = %err, "failed to restore working directory");
    }
  }
}
