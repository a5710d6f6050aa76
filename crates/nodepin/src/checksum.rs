use std::io::Read;
use std::sync::Arc;

use parking_lot::Mutex;
use sha2::Digest;
use sha2::Sha256;

/// Hashes every byte read through it with SHA-256.
///
/// The digest is read through a [`Checksum`] handle because the reader itself
/// is usually moved into a decoder.
pub struct ChecksumReader<R> {
  inner: R,
  hasher: Arc<Mutex<Sha256>>,
}

impl<R: Read> ChecksumReader<R> {
  pub fn new(inner: R) -> Self {
    Self {
      inner,
      hasher: Arc::new(Mutex::new(Sha256::new())),
    }
  }

  pub fn handle(&self) -> Checksum {
    Checksum(self.hasher.clone())
  }
}

impl<R: Read> Read for ChecksumReader<R> {
  fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
    let read = self.inner.read(buf)?;
    self.hasher.lock().update(&buf[..read]);
    Ok(read)
  }
}

#[derive(Clone)]
pub struct Checksum(Arc<Mutex<Sha256>>);

impl Checksum {
  /// Lowercase hex digest of the bytes read so far.
  ///
  /// Only meaningful once the underlying stream has been fully drained.
  pub fn hex_digest(&self) -> String {
    let hasher = self.0.lock().clone();
    hex::encode(hasher.finalize())
  }
}
