pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Unable to download {url}: {reason}")]
  RemoteFetch { url: String, reason: String },
  #[error("Unable to download {url}: {status}: {content_type}")]
  RemoteStatus {
    url: String,
    status: String,
    content_type: String,
  },
  #[error("Unable to create HTTP client: {0}")]
  HttpClient(String),
  #[error("Invalid SHA for {artifact}: expected {expected}, got {actual}")]
  ChecksumMismatch {
    artifact: String,
    expected: String,
    actual: String,
  },
  #[error("Unexpected archive layout: expected {expected:?} but found {found:?}")]
  UnexpectedArchiveLayout {
    expected: String,
    found: Vec<String>,
  },
  #[error("Expected {artifact} {actual:?} to equal {expected:?}")]
  VersionMismatch {
    artifact: String,
    expected: String,
    actual: String,
  },
  #[error("Invalid pins: {0}")]
  InvalidPins(#[from] serde_json::Error),
  #[error("Unsupported platform {os}-{arch}")]
  UnsupportedPlatform { os: String, arch: String },
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

impl Error {
  /// Transport failures and error statuses both count as a failed remote fetch
  pub fn is_remote_fetch(&self) -> bool {
    matches!(self, Error::RemoteFetch { .. } | Error::RemoteStatus { .. })
  }
}
