use std::fs;
use std::path::Path;

/// Remove a file or folder if it exists
pub fn remove_if_exists<P: AsRef<Path>>(target: P) -> std::io::Result<()> {
  let target = target.as_ref();

  if !fs::exists(target)? {
    log::debug!("remv:does_not_exist: {:?}", target);
    return Ok(());
  }

  let meta = fs::symlink_metadata(target)?;

  if meta.is_dir() {
    log::info!("remv:dir: {:?}", target);
    return fs::remove_dir_all(target);
  }

  log::info!("remv:file: {:?}", target);
  fs::remove_file(target)
}

/// Creates a directory if it doesn't exist
pub fn create_dir_if_not_exists<P: AsRef<Path>>(target: P) -> std::io::Result<()> {
  let target = target.as_ref();
  if fs::exists(target)? {
    log::debug!("create_dir:already_exists: {:?}", target);
    return Ok(());
  }
  log::info!("create_dir:create: {:?}", target);
  fs::create_dir_all(target)
}

/// Sets mode 0755 on unix, no-op elsewhere
pub fn make_executable<P: AsRef<Path>>(target: P) -> std::io::Result<()> {
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(target.as_ref(), fs::Permissions::from_mode(0o755))?;
  }

  #[cfg(not(unix))]
  let _ = target;

  Ok(())
}

/// Names of the directories directly inside `base` that start with `prefix`
pub fn dirs_with_prefix<P: AsRef<Path>>(base: P, prefix: &str) -> std::io::Result<Vec<String>> {
  let base = base.as_ref();
  if !fs::exists(base)? {
    return Ok(vec![]);
  }

  let mut found = vec![];
  for entry in fs::read_dir(base)? {
    let entry = entry?;
    if !entry.file_type()?.is_dir() {
      continue;
    }
    let Ok(name) = entry.file_name().into_string() else {
      continue;
    };
    if name.starts_with(prefix) {
      found.push(name);
    }
  }
  found.sort();

  Ok(found)
}
