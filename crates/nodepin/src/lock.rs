use std::fs::File;
use std::fs::OpenOptions;
use std::path::Path;
use std::path::PathBuf;

use fs4::fs_std::FileExt;

use crate::error::Result;
use crate::fs_ext;

/// Exclusive advisory lock on a file in the install root.
///
/// Acquisition blocks until every other holder, in this or another process,
/// has released it. The lock is released when the guard is dropped. The lock
/// file itself is left on disk.
pub struct InstallLock {
  file: File,
  path: PathBuf,
}

impl InstallLock {
  pub fn acquire(path: &Path) -> Result<Self> {
    if let Some(parent) = path.parent() {
      fs_ext::create_dir_if_not_exists(parent)?;
    }

    let file = OpenOptions::new()
      .create(true)
      .read(true)
      .write(true)
      .truncate(false)
      .open(path)?;

    log::debug!("lock:wait {:?}", path);
    FileExt::lock_exclusive(&file)?;
    log::debug!("lock:acquired {:?}", path);

    Ok(Self {
      file,
      path: path.to_path_buf(),
    })
  }
}

impl Drop for InstallLock {
  fn drop(&mut self) {
    if let Err(error) = FileExt::unlock(&self.file) {
      log::warn!("lock:release_failed {:?} {}", self.path, error);
      return;
    }
    log::debug!("lock:released {:?}", self.path);
  }
}
