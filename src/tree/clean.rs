//! Strip version-control history and build/cache directories from a copy

use crate::core::error::{BootstrapResult, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Remove `.git` and every directory named in `clean_dirs`, at any depth
///
/// Returns the number of directories removed. Failing to remove `.git` is
/// logged and ignored; any other removal failure aborts.
pub fn clean_metadata(root: &Path, clean_dirs: &[String]) -> BootstrapResult<usize> {
  let git_dir = root.join(".git");
  if git_dir.exists()
    && let Err(e) = fs::remove_dir_all(&git_dir)
  {
    tracing::warn!(path = %git_dir.display(), error = %e, "could not remove version-control metadata");
  }

  let mut matched: Vec<PathBuf> = Vec::new();
  let mut walker = WalkDir::new(root).min_depth(1).into_iter();
  while let Some(entry) = walker.next() {
    let entry = entry?;
    if !entry.file_type().is_dir() {
      continue;
    }
    if clean_dirs.iter().any(|name| entry.file_name() == name.as_str()) {
      matched.push(entry.path().to_path_buf());
      walker.skip_current_dir();
    }
  }

  for dir in &matched {
    tracing::debug!(path = %dir.display(), "removing build/cache directory");
    fs::remove_dir_all(dir).with_context(|| format!("Failed to remove {}", dir.display()))?;
  }

  Ok(matched.len())
}
