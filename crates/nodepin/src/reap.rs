use std::path::Path;
use std::path::PathBuf;

use crate::error::Result;
use crate::fs_ext;

/// Remove directories in `root` left behind by previously pinned versions.
///
/// For each `(prefix, keep)` pair, every directory whose name starts with
/// `prefix` is removed unless its name is exactly `keep`. A directory that
/// cannot be removed is logged and skipped. Returns the removed paths.
pub fn reap_stale_installs(root: &Path, components: &[(&str, &str)]) -> Result<Vec<PathBuf>> {
  let mut removed = vec![];

  for (prefix, keep) in components {
    for name in fs_ext::dirs_with_prefix(root, prefix)? {
      if name == *keep {
        continue;
      }
      let stale = root.join(&name);
      match fs_ext::remove_if_exists(&stale) {
        Ok(()) => {
          log::info!("reap:removed {:?}", stale);
          removed.push(stale);
        }
        Err(error) => log::warn!("reap:failed {:?} {}", stale, error),
      }
    }
  }

  Ok(removed)
}
