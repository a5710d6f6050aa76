use std::fs;
use std::ops::Deref;
use std::path::Path;
use std::path::PathBuf;

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::error::Result;

/// Uniquely named scratch directory that is removed when dropped
pub struct TempDir(PathBuf);

impl TempDir {
  pub fn new(base: &Path) -> Result<Self> {
    let random = rand::thread_rng()
      .sample_iter(&Alphanumeric)
      .take(7)
      .map(char::from)
      .collect::<String>();

    let target = base.join(&random);
    fs::create_dir(&target)?;
    log::debug!("temp_dir:create {:?}", target);

    Ok(Self(target))
  }
}

impl AsRef<Path> for TempDir {
  fn as_ref(&self) -> &Path {
    &self.0
  }
}

impl Deref for TempDir {
  type Target = PathBuf;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Drop for TempDir {
  fn drop(&mut self) {
    log::debug!("temp_dir:remove {:?}", self.0);
    fs::remove_dir_all(&self.0).ok();
  }
}
