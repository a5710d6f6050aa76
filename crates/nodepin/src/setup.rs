use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use crate::config::RuntimeConfig;
use crate::error::Error;
use crate::error::Result;
use crate::fetch::Fetch;
use crate::fetch::HttpFetcher;
use crate::fs_ext;
use crate::install::Installer;
use crate::lock::InstallLock;
use crate::paths;
use crate::paths::Paths;
use crate::reap;
use crate::version;

/// Fetcher instance shared by every setup
pub type FetchRef = Arc<dyn Fetch + Send + Sync>;

/// A pinned node and npm installation rooted at one directory
pub struct Runtime {
  config: RuntimeConfig,
  fetcher: FetchRef,
}

impl Runtime {
  pub fn new(config: RuntimeConfig, fetcher: FetchRef) -> Self {
    Self { config, fetcher }
  }

  pub fn from_config(config: RuntimeConfig) -> Result<Self> {
    let fetcher = Arc::new(HttpFetcher::new(config.progress)?);
    Ok(Self::new(config, fetcher))
  }

  pub fn config(&self) -> &RuntimeConfig {
    &self.config
  }

  pub fn paths(&self) -> &Paths {
    &self.config.paths
  }

  /// True when both node and npm are present. Only checks existence and
  /// takes no lock, so it is cheap enough to call before every command.
  pub fn is_setup(&self) -> Result<bool> {
    if !fs::exists(&self.paths().node_bin)? {
      return Ok(false);
    }
    Ok(fs::exists(&self.paths().npm_cli)?)
  }

  /// Install whatever is missing while holding the install lock
  pub fn setup(&self) -> Result<()> {
    let paths = self.paths();
    let _lock = InstallLock::acquire(&paths.lock_file)?;

    if self.is_setup()? {
      log::debug!("setup:already_installed {:?}", paths.root);
      return Ok(());
    }

    let installer = Installer::new(self.fetcher.as_ref(), paths);

    if !fs::exists(&paths.node_bin)? {
      self.install_node(&installer)?;
    }

    if !fs::exists(&paths.npm_cli)? {
      self.install_npm(&installer)?;
    }

    fs_ext::create_dir_if_not_exists(&paths.modules)?;
    self.reap();

    log::info!("setup:complete {:?}", paths.root);
    Ok(())
  }

  /// `node -e <script>` with the installed node
  pub fn script_command(&self, script: &str) -> Command {
    let mut command = Command::new(&self.paths().node_bin);
    command.arg("-e").arg(script);
    command.env("NODE_PATH", &self.paths().modules);
    command
  }

  /// `node <npm cli.js> <args>` with the installed node and npm
  pub fn npm_command<I, S>(&self, args: I) -> Command
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    let mut command = Command::new(&self.paths().node_bin);
    command.arg(&self.paths().npm_cli).args(args);
    command.env("NODE_PATH", &self.paths().modules);
    command
  }

  fn install_node(&self, installer: &Installer<'_>) -> Result<()> {
    let node = &self.config.node;
    installer.install_binary(node)?;

    let checked = fs_ext::make_executable(&node.target)
      .map_err(Error::from)
      .and_then(|_| {
        version::verify_version(
          &node.name,
          self.script_command(version::NODE_VERSION_SCRIPT),
          &version::node_version_output(&node.version),
        )
      });

    if let Err(error) = checked {
      rollback(&node.target);
      return Err(error);
    }
    Ok(())
  }

  fn install_npm(&self, installer: &Installer<'_>) -> Result<()> {
    let npm = &self.config.npm;
    installer.install_package_manager(npm, &paths::npm_dir_name(&npm.version))?;

    let checked = version::verify_version(
      &npm.name,
      self.npm_command(["-v"]),
      &version::npm_version_output(&npm.version),
    );

    if let Err(error) = checked {
      rollback(&npm.target);
      return Err(error);
    }
    Ok(())
  }

  /// Failures here are not fatal, stale directories are only wasted space
  fn reap(&self) {
    let node_dir = paths::node_dir_name(&self.config.node.version, &self.config.platform);
    let npm_dir = paths::npm_dir_name(&self.config.npm.version);
    let components = [
      (paths::NODE_DIR_PREFIX, node_dir.as_str()),
      (paths::NPM_DIR_PREFIX, npm_dir.as_str()),
    ];

    reap_logged(&self.paths().root, &components);
  }
}

fn reap_logged(root: &Path, components: &[(&str, &str)]) {
  match reap::reap_stale_installs(root, components) {
    Ok(removed) => log::debug!("setup:reaped {}", removed.len()),
    Err(error) => log::warn!("setup:reap_failed {}", error),
  }
}

fn rollback(target: &Path) {
  log::warn!("setup:rollback {:?}", target);
  if let Err(error) = fs_ext::remove_if_exists(target) {
    log::warn!("setup:rollback_failed {:?} {}", target, error);
  }
}
