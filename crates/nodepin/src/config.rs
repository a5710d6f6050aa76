use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Result;
use crate::paths::Paths;
use crate::platform::Platform;

/// A pinned download as written in the pins document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ArtifactPin {
  pub version: String,
  /// May contain `{version}`, `{os}` and `{arch}` placeholders
  pub url: String,
  /// Lowercase hex SHA-256 of the compressed download
  pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Pins {
  pub node: ArtifactPin,
  pub npm: ArtifactPin,
}

impl Pins {
  pub fn from_json(input: &str) -> Result<Self> {
    Ok(serde_json::from_str(input)?)
  }

  pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    log::info!("pins:read {:?}", path);
    let contents = fs::read_to_string(path)?;
    Self::from_json(&contents)
  }
}

/// One pinned component resolved against the install root
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
  pub name: String,
  pub version: String,
  pub url: String,
  pub sha256: String,
  pub target: PathBuf,
}

impl Artifact {
  fn resolve(name: &str, pin: &ArtifactPin, platform: &Platform, target: &Path) -> Self {
    let url = pin
      .url
      .replace("{version}", &pin.version)
      .replace("{os}", &platform.os)
      .replace("{arch}", &platform.arch);

    Self {
      name: name.to_string(),
      version: pin.version.clone(),
      url,
      sha256: pin.sha256.to_lowercase(),
      target: target.to_path_buf(),
    }
  }
}

/// Everything a [`crate::Runtime`] needs, fixed at process start
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
  pub paths: Paths,
  pub platform: Platform,
  pub node: Artifact,
  pub npm: Artifact,
  pub progress: bool,
}

impl RuntimeConfig {
  pub fn new(root: impl Into<PathBuf>, pins: &Pins) -> Result<Self> {
    Ok(Self::with_platform(root, pins, Platform::current()?))
  }

  pub fn with_platform(root: impl Into<PathBuf>, pins: &Pins, platform: Platform) -> Self {
    let root = root.into();
    let paths = Paths::new(&root, &platform, &pins.node.version, &pins.npm.version);
    let node = Artifact::resolve("node", &pins.node, &platform, &paths.node_bin);
    let npm = Artifact::resolve("npm", &pins.npm, &platform, &paths.npm_dir);

    Self {
      paths,
      platform,
      node,
      npm,
      progress: true,
    }
  }

  pub fn with_progress(mut self, progress: bool) -> Self {
    self.progress = progress;
    self
  }
}
