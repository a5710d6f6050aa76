use std::process::Command;

use crate::error::Error;
use crate::error::Result;

/// Prints node's own version without a trailing newline
pub static NODE_VERSION_SCRIPT: &str = "process.stdout.write(process.version)";

/// Node reports its version with a leading "v"
pub fn node_version_output(version: &str) -> String {
  format!("v{}", version)
}

/// `npm -v` prints the bare version on its own line
pub fn npm_version_output(version: &str) -> String {
  format!("{}\n", version)
}

/// Run `command` and require that its combined output is exactly `expected`,
/// byte for byte. A non-zero exit is a mismatch even when the output happens
/// to match.
pub fn verify_version(artifact: &str, mut command: Command, expected: &str) -> Result<()> {
  log::info!("version:check {} expecting {:?}", artifact, expected);

  let output = command.output()?;
  let mut reported = String::from_utf8_lossy(&output.stdout).to_string();
  reported.push_str(&String::from_utf8_lossy(&output.stderr));

  if !output.status.success() {
    log::warn!("version:failed {} {}", artifact, output.status);
    return Err(Error::VersionMismatch {
      artifact: artifact.to_string(),
      expected: expected.to_string(),
      actual: format!("{} ({})", reported, output.status),
    });
  }

  if reported != expected {
    log::warn!("version:mismatch {} {:?}", artifact, reported);
    return Err(Error::VersionMismatch {
      artifact: artifact.to_string(),
      expected: expected.to_string(),
      actual: reported,
    });
  }

  Ok(())
}
