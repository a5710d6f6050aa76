use std::fs;
use std::io::Read;
use std::path::Path;

use tar::Archive;
use xz2::read::XzDecoder;

/// Decodes every stream in `reader`, skipping stream padding between and after them
pub fn xz<R: Read>(reader: R) -> XzDecoder<R> {
  XzDecoder::new_multi_decoder(reader)
}

/// Unpack a tar stream into `dest`, returning once the end-of-archive marker is read
pub fn unpack_tar<R: Read>(reader: R, dest: &Path) -> std::io::Result<()> {
  log::info!("archive:unpack {:?}", dest);
  let mut archive = Archive::new(reader);
  archive.set_preserve_permissions(true);
  archive.unpack(dest)
}

/// Top level entry names in `dir`, used to describe an unexpected layout
pub fn list_entries(dir: &Path) -> std::io::Result<Vec<String>> {
  let mut names = fs::read_dir(dir)?
    .filter_map(|entry| entry.ok())
    .map(|entry| entry.file_name().to_string_lossy().to_string())
    .collect::<Vec<String>>();
  names.sort();
  Ok(names)
}
