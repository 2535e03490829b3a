//! Rename source files named after a template class

use crate::core::error::{BootstrapResult, ResultExt};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A source file renamed in place
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedFile {
  pub from: PathBuf,
  pub to: PathBuf,
}

/// Rename every `<old_name>.<extension>` under `source_root` to `<new_name>.<extension>`
///
/// A missing source root is not an error.
pub fn rename_sources(
  source_root: &Path,
  old_name: &str,
  new_name: &str,
  extension: &str,
) -> BootstrapResult<Vec<RenamedFile>> {
  if !source_root.is_dir() || old_name == new_name {
    return Ok(Vec::new());
  }

  let old_file = format!("{}.{}", old_name, extension);
  let new_file = format!("{}.{}", new_name, extension);

  let mut matches = Vec::new();
  for entry in WalkDir::new(source_root) {
    let entry = entry?;
    if entry.file_type().is_file() && entry.file_name() == old_file.as_str() {
      matches.push(entry.into_path());
    }
  }

  let mut renamed = Vec::with_capacity(matches.len());
  for from in matches {
    let to = from.with_file_name(&new_file);
    fs::rename(&from, &to).with_context(|| format!("Failed to rename {} to {}", from.display(), to.display()))?;
    tracing::debug!(from = %from.display(), to = %to.display(), "renamed source file");
    renamed.push(RenamedFile { from, to });
  }

  Ok(renamed)
}
