use std::collections::HashMap;
use std::io::Cursor;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use sha2::Digest;
use sha2::Sha256;
use xz2::write::XzEncoder;

use crate::config::ArtifactPin;
use crate::config::Pins;
use crate::config::RuntimeConfig;
use crate::error::Error;
use crate::error::Result;
use crate::fetch::Fetch;

pub const NODE_VERSION: &str = "20.11.1";
pub const NPM_VERSION: &str = "10.2.4";
pub const NODE_URL: &str = "https://nodepin.test/node.xz";
pub const NPM_URL: &str = "https://nodepin.test/npm.tar.xz";

pub fn xz(bytes: &[u8]) -> Vec<u8> {
  let mut encoder = XzEncoder::new(Vec::new(), 6);
  encoder.write_all(bytes).unwrap();
  encoder.finish().unwrap()
}

pub fn sha256_hex(bytes: &[u8]) -> String {
  hex::encode(Sha256::digest(bytes))
}

/// xz compressed tarball holding the given files
pub fn tar_xz(files: &[(&str, &[u8])]) -> Vec<u8> {
  let mut builder = tar::Builder::new(Vec::new());
  for (path, contents) in files {
    let mut header = tar::Header::new_gnu();
    header.set_size(contents.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder.append_data(&mut header, path, *contents).unwrap();
  }
  xz(&builder.into_inner().unwrap())
}

/// A shell script standing in for node.
///
/// `node -e <script>` prints `node_reports`, anything else (npm's cli.js) prints
/// `npm_reports` followed by a newline.
pub fn fake_node(node_reports: &str, npm_reports: &str) -> Vec<u8> {
  format!(
    "#!/bin/sh\nif [ \"$1\" = \"-e\" ]; then\n  printf '%s' '{}'\nelse\n  printf '%s\\n' '{}'\nfi\n",
    node_reports, npm_reports
  )
  .into_bytes()
}

pub fn npm_tarball(top_level: &str) -> Vec<u8> {
  tar_xz(&[
    (
      format!("{}/cli.js", top_level).as_str(),
      b"require('./lib/npm.js')".as_slice(),
    ),
    (
      format!("{}/package.json", top_level).as_str(),
      format!("{{\"version\":\"{}\"}}", NPM_VERSION).as_bytes(),
    ),
  ])
}

pub fn pins(node_payload: &[u8], npm_payload: &[u8]) -> Pins {
  Pins {
    node: ArtifactPin {
      version: NODE_VERSION.to_string(),
      url: NODE_URL.to_string(),
      sha256: sha256_hex(node_payload),
    },
    npm: ArtifactPin {
      version: NPM_VERSION.to_string(),
      url: NPM_URL.to_string(),
      sha256: sha256_hex(npm_payload),
    },
  }
}

pub fn config(root: &Path, pins: &Pins) -> RuntimeConfig {
  RuntimeConfig::new(root, pins).unwrap().with_progress(false)
}

/// Serves fixed payloads by URL and counts requests
#[derive(Default)]
pub struct StaticFetcher {
  payloads: HashMap<String, Vec<u8>>,
  delay: Duration,
  calls: AtomicUsize,
}

impl StaticFetcher {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, url: &str, payload: Vec<u8>) -> Self {
    self.payloads.insert(url.to_string(), payload);
    self
  }

  pub fn with_delay(mut self, delay: Duration) -> Self {
    self.delay = delay;
    self
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

impl Fetch for StaticFetcher {
  fn get(&self, url: &str) -> Result<Box<dyn Read + Send>> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    thread::sleep(self.delay);

    match self.payloads.get(url) {
      Some(payload) => Ok(Box::new(Cursor::new(payload.clone()))),
      None => Err(Error::RemoteStatus {
        url: url.to_string(),
        status: "404 Not Found".to_string(),
        content_type: "text/html".to_string(),
      }),
    }
  }
}
