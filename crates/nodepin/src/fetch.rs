use std::io;
use std::io::Read;
use std::time::Duration;

use indicatif::ProgressBar;
use indicatif::ProgressDrawTarget;
use indicatif::ProgressStyle;
use mockall::automock;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use xz2::read::XzDecoder;

use crate::archive;
use crate::checksum::Checksum;
use crate::checksum::ChecksumReader;
use crate::error::Error;
use crate::error::Result;

/// Downloads are large and only happen once, so the timeout is generous
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30 * 60);

static PROGRESS_MESSAGE: &str = "Adding dependencies...";

/// Source of raw (still compressed) artifact bytes
#[automock]
pub trait Fetch {
  fn get(&self, url: &str) -> Result<Box<dyn Read + Send>>;
}

pub struct HttpFetcher {
  client: Client,
  progress: bool,
}

impl HttpFetcher {
  pub fn new(progress: bool) -> Result<Self> {
    let client = Client::builder()
      .timeout(DOWNLOAD_TIMEOUT)
      .user_agent(concat!("nodepin/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|error| Error::HttpClient(error.to_string()))?;

    Ok(Self { client, progress })
  }

  fn progress_bar(&self, size: Option<u64>) -> ProgressBar {
    if !self.progress {
      return ProgressBar::hidden();
    }
    let bar = ProgressBar::with_draw_target(size, ProgressDrawTarget::stderr());
    let style = ProgressStyle::with_template("{msg} {bytes:>12}/{total_bytes:12} {bar:30}")
      .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar.set_message(PROGRESS_MESSAGE);
    bar
  }
}

impl Fetch for HttpFetcher {
  fn get(&self, url: &str) -> Result<Box<dyn Read + Send>> {
    log::info!("fetch:get {}", url);

    let response = self
      .client
      .get(url)
      .send()
      .map_err(|error| Error::RemoteFetch {
        url: url.to_string(),
        reason: error.to_string(),
      })?;

    let status = response.status();
    if status.as_u16() >= 400 {
      let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
      log::warn!("fetch:error_status {} {}", url, status);
      return Err(Error::RemoteStatus {
        url: url.to_string(),
        status: status.to_string(),
        content_type,
      });
    }

    let bar = self.progress_bar(response.content_length());
    Ok(Box::new(bar.wrap_read(response)))
  }
}

/// A decompressing stream over a download together with its checksum
pub struct Download {
  reader: XzDecoder<ChecksumReader<Box<dyn Read + Send>>>,
  checksum: Checksum,
}

impl Download {
  /// Drains anything left in the download and returns the digest of all of it
  pub fn finish(mut self) -> Result<String> {
    io::copy(&mut self.reader, &mut io::sink())?;
    io::copy(self.reader.get_mut(), &mut io::sink())?;
    Ok(self.checksum.hex_digest())
  }
}

impl Read for Download {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    self.reader.read(buf)
  }
}

/// GET `url` and decompress it as xz, hashing the compressed bytes on the way
pub fn fetch_xz(fetcher: &dyn Fetch, url: &str) -> Result<Download> {
  let body = fetcher.get(url)?;
  let reader = ChecksumReader::new(body);
  let checksum = reader.handle();

  Ok(Download {
    reader: archive::xz(reader),
    checksum,
  })
}

#[cfg(test)]
mod test {
  use std::io::Cursor;

  use pretty_assertions::assert_eq;
  use wiremock::matchers::method;
  use wiremock::matchers::path;
  use wiremock::Mock;
  use wiremock::MockServer;
  use wiremock::ResponseTemplate;

  use super::*;
  use crate::test_utils;

  #[test]
  fn test_fetch_xz_decompresses_and_hashes_compressed_bytes() {
    let compressed = test_utils::xz(b"payload");
    let expected = test_utils::sha256_hex(&compressed);

    let mut fetcher = MockFetch::new();
    fetcher
      .expect_get()
      .withf(|url| url.to_string() == "https://nodepin.test/file.xz")
      .times(1)
      .returning(move |_| Ok(Box::new(Cursor::new(compressed.clone()))));

    let mut download = fetch_xz(&fetcher, "https://nodepin.test/file.xz").unwrap();
    let mut out = vec![];
    download.read_to_end(&mut out).unwrap();

    assert_eq!(out, b"payload");
    assert_eq!(download.finish().unwrap(), expected);
  }

  #[test]
  fn test_finish_covers_trailing_bytes() {
    let mut compressed = test_utils::xz(b"payload");
    compressed.extend_from_slice(&[0u8; 16]);
    let expected = test_utils::sha256_hex(&compressed);

    let mut fetcher = MockFetch::new();
    fetcher
      .expect_get()
      .returning(move |_| Ok(Box::new(Cursor::new(compressed.clone()))));

    let mut download = fetch_xz(&fetcher, "https://nodepin.test/file.xz").unwrap();
    let mut out = vec![];
    download.read_to_end(&mut out).unwrap();

    assert_eq!(download.finish().unwrap(), expected);
  }

  #[test]
  fn test_fetch_error_is_propagated() {
    let mut fetcher = MockFetch::new();
    fetcher.expect_get().returning(|url| {
      Err(Error::RemoteFetch {
        url: url.to_string(),
        reason: "connection refused".to_string(),
      })
    });

    let result = fetch_xz(&fetcher, "https://nodepin.test/file.xz");
    assert!(matches!(result, Err(error) if error.is_remote_fetch()));
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn test_http_error_status_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/node.xz"))
      .respond_with(
        ResponseTemplate::new(404).set_body_raw("<html>Not Found</html>", "text/html"),
      )
      .mount(&server)
      .await;

    let url = format!("{}/node.xz", server.uri());
    let result = tokio::task::spawn_blocking(move || {
      let fetcher = HttpFetcher::new(false)?;
      fetcher.get(&url).map(|_| ())
    })
    .await
    .unwrap();

    match result {
      Err(Error::RemoteStatus {
        status,
        content_type,
        ..
      }) => {
        assert_eq!(status, "404 Not Found");
        assert_eq!(content_type, "text/html");
      }
      other => panic!("expected RemoteStatus, got {:?}", other),
    }
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn test_non_standard_error_status_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/node.xz"))
      .respond_with(ResponseTemplate::new(600).set_body_bytes(test_utils::xz(b"node")))
      .mount(&server)
      .await;

    let url = format!("{}/node.xz", server.uri());
    let result = tokio::task::spawn_blocking(move || {
      let fetcher = HttpFetcher::new(false)?;
      fetcher.get(&url).map(|_| ())
    })
    .await
    .unwrap();

    match result {
      Err(Error::RemoteStatus { status, .. }) => assert!(status.starts_with("600")),
      other => panic!("expected RemoteStatus, got {:?}", other),
    }
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn test_http_body_is_streamed() {
    let compressed = test_utils::xz(b"node binary");
    let expected = test_utils::sha256_hex(&compressed);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/node.xz"))
      .respond_with(ResponseTemplate::new(200).set_body_bytes(compressed))
      .mount(&server)
      .await;

    let url = format!("{}/node.xz", server.uri());
    let (out, digest) = tokio::task::spawn_blocking(move || -> Result<(Vec<u8>, String)> {
      let fetcher = HttpFetcher::new(false)?;
      let mut download = fetch_xz(&fetcher, &url)?;
      let mut out = vec![];
      download.read_to_end(&mut out)?;
      Ok((out, download.finish()?))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(out, b"node binary");
    assert_eq!(digest, expected);
  }
}
