use std::path::PathBuf;

/// The install root, either given explicitly or $HOME/.local/nodepin
pub fn nodepin_dir(dir: Option<PathBuf>) -> anyhow::Result<PathBuf> {
  if let Some(dir) = dir {
    return Ok(dir);
  }

  let Ok(Some(home)) = homedir::my_home() else {
    return Err(anyhow::anyhow!(
      "Cannot find home directory. Please set $NODEPIN_DIR variable manually"
    ));
  };
  let default_dir = home.join(".local").join("nodepin");
  if default_dir.is_file() {
    return Err(anyhow::anyhow!("{:?} exists but is a file", default_dir));
  }
  Ok(default_dir)
}
