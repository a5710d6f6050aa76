use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::fs_ext;
use crate::platform::Platform;
use crate::platform::NODE_BIN_NAME;
use crate::temp_dir::TempDir;

pub static NODE_DIR_PREFIX: &str = "node-";
pub static NPM_DIR_PREFIX: &str = "npm-";
pub static NPM_CLI_FILE: &str = "cli.js";
pub static MODULES_DIR: &str = "node_modules";
pub static LOCK_FILE: &str = "node.lock";
pub static TEMP_DIR: &str = "tmp";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Paths {
  /// $NODEPIN_DIR (default $HOME/.local/nodepin)
  pub root: PathBuf,
  /// $NODEPIN_DIR/node-<version>-<os>-<arch>
  pub node_dir: PathBuf,
  /// $NODEPIN_DIR/node-<version>-<os>-<arch>/bin/node
  pub node_bin: PathBuf,
  /// $NODEPIN_DIR/npm-<version>
  pub npm_dir: PathBuf,
  /// $NODEPIN_DIR/npm-<version>/cli.js
  pub npm_cli: PathBuf,
  /// $NODEPIN_DIR/node_modules
  pub modules: PathBuf,
  /// $NODEPIN_DIR/node.lock
  pub lock_file: PathBuf,
  /// $NODEPIN_DIR/tmp
  pub temp: PathBuf,
}

impl Paths {
  pub fn new(root: &Path, platform: &Platform, node_version: &str, npm_version: &str) -> Self {
    let node_dir = root.join(node_dir_name(node_version, platform));
    let npm_dir = root.join(npm_dir_name(npm_version));

    Self {
      root: root.to_path_buf(),
      node_bin: node_dir.join("bin").join(NODE_BIN_NAME),
      node_dir,
      npm_cli: npm_dir.join(NPM_CLI_FILE),
      npm_dir,
      modules: root.join(MODULES_DIR),
      lock_file: root.join(LOCK_FILE),
      temp: root.join(TEMP_DIR),
    }
  }

  /// Creates a fresh scratch directory under $NODEPIN_DIR/tmp
  pub fn temp_dir(&self) -> Result<TempDir> {
    fs_ext::create_dir_if_not_exists(&self.temp)?;
    TempDir::new(&self.temp)
  }
}

pub fn node_dir_name(version: &str, platform: &Platform) -> String {
  format!("{}{}-{}-{}", NODE_DIR_PREFIX, version, platform.os, platform.arch)
}

pub fn npm_dir_name(version: &str) -> String {
  format!("{}{}", NPM_DIR_PREFIX, version)
}
