use crate::error::Error;
use crate::error::Result;

#[cfg(unix)]
pub static NODE_BIN_NAME: &str = "node";

#[cfg(windows)]
pub static NODE_BIN_NAME: &str = "node.exe";

/// Operating system and architecture names as they appear in node release names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
  pub os: String,
  pub arch: String,
}

impl Platform {
  pub fn current() -> Result<Self> {
    Self::from_rust(std::env::consts::OS, std::env::consts::ARCH)
  }

  pub fn from_rust(os: &str, arch: &str) -> Result<Self> {
    let node_os = match os {
      "linux" => "linux",
      "macos" => "darwin",
      "windows" => "win",
      "freebsd" => "freebsd",
      "openbsd" => "openbsd",
      _ => return Err(unsupported(os, arch)),
    };
    let node_arch = match arch {
      "x86_64" => "x64",
      "x86" => "x86",
      "aarch64" => "arm64",
      "arm" => "arm",
      _ => return Err(unsupported(os, arch)),
    };
    Ok(Self {
      os: node_os.to_string(),
      arch: node_arch.to_string(),
    })
  }
}

fn unsupported(os: &str, arch: &str) -> Error {
  Error::UnsupportedPlatform {
    os: os.to_string(),
    arch: arch.to_string(),
  }
}
