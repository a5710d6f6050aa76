use std::fs;
use std::fs::File;
use std::io;

use crate::archive;
use crate::config::Artifact;
use crate::error::Error;
use crate::error::Result;
use crate::fetch;
use crate::fetch::Fetch;
use crate::fs_ext;
use crate::paths::Paths;

/// Runs the download, verify and relocate pipeline for one artifact.
///
/// Staging happens in a scratch directory under the install root so the final
/// move is a rename on the same filesystem. The scratch directory is removed
/// on every exit path.
pub struct Installer<'a> {
  fetcher: &'a dyn Fetch,
  paths: &'a Paths,
}

impl<'a> Installer<'a> {
  pub fn new(fetcher: &'a dyn Fetch, paths: &'a Paths) -> Self {
    Self { fetcher, paths }
  }

  /// Install a single xz compressed file at `artifact.target`
  pub fn install_binary(&self, artifact: &Artifact) -> Result<()> {
    log::info!(
      "install:binary {} {} -> {:?}",
      artifact.name,
      artifact.url,
      artifact.target
    );

    let mut download = fetch::fetch_xz(self.fetcher, &artifact.url)?;
    let scratch = self.paths.temp_dir()?;
    let temp_file = scratch.join("file");

    let mut file = File::create(&temp_file)?;
    io::copy(&mut download, &mut file)?;
    file.sync_all()?;
    drop(file);

    verify_checksum(artifact, &download.finish()?)?;

    if let Some(parent) = artifact.target.parent() {
      fs_ext::create_dir_if_not_exists(parent)?;
    }
    fs_ext::remove_if_exists(&artifact.target)?;
    fs::rename(&temp_file, &artifact.target)?;

    drop(scratch);
    Ok(())
  }

  /// Install an xz compressed tarball whose only top level entry is the
  /// directory `top_level`, moving that directory to `artifact.target`.
  ///
  /// The checksum is compared after the archive has been unpacked into the
  /// scratch directory.
  pub fn install_package_manager(&self, artifact: &Artifact, top_level: &str) -> Result<()> {
    log::info!(
      "install:package {} {} -> {:?}",
      artifact.name,
      artifact.url,
      artifact.target
    );

    let mut download = fetch::fetch_xz(self.fetcher, &artifact.url)?;
    let scratch = self.paths.temp_dir()?;

    archive::unpack_tar(&mut download, &scratch)?;
    verify_checksum(artifact, &download.finish()?)?;

    let extracted = scratch.join(top_level);
    if !extracted.is_dir() {
      return Err(Error::UnexpectedArchiveLayout {
        expected: top_level.to_string(),
        found: archive::list_entries(&scratch)?,
      });
    }

    fs_ext::remove_if_exists(&artifact.target)?;
    fs::rename(&extracted, &artifact.target)?;

    drop(scratch);
    Ok(())
  }
}

fn verify_checksum(artifact: &Artifact, actual: &str) -> Result<()> {
  if actual == artifact.sha256 {
    log::debug!("install:checksum_ok {} {}", artifact.name, actual);
    return Ok(());
  }

  log::warn!(
    "install:checksum_mismatch {} expected {} got {}",
    artifact.name,
    artifact.sha256,
    actual
  );
  Err(Error::ChecksumMismatch {
    artifact: artifact.name.clone(),
    expected: artifact.sha256.clone(),
    actual: actual.to_string(),
  })
}
