//! Rewrite text files in place by applying a replacement plan

use crate::core::config::TemplateLayout;
use crate::core::error::{BootstrapResult, ResultExt};
use crate::core::plan::ReplacementPlan;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What happened to a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
  Rewritten,
  Unchanged,
  /// Content is not valid UTF-8
  Undecodable,
}

/// Totals over one substitution pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubstitutionReport {
  pub files_scanned: usize,
  pub files_rewritten: usize,
  pub files_undecodable: usize,
}

impl SubstitutionReport {
  pub fn record(&mut self, outcome: FileOutcome) {
    self.files_scanned += 1;
    match outcome {
      FileOutcome::Rewritten => self.files_rewritten += 1,
      FileOutcome::Unchanged => {}
      FileOutcome::Undecodable => self.files_undecodable += 1,
    }
  }
}

/// Decide whether a file's contents should be rewritten
pub fn is_text_file(path: &Path, layout: &TemplateLayout) -> bool {
  let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
    return false;
  };

  if layout.text_file_names.iter().any(|n| n == name) {
    return true;
  }

  match path.extension().and_then(|e| e.to_str()) {
    Some(ext) => layout
      .text_extensions
      .iter()
      .any(|allowed| allowed.strip_prefix('.') == Some(ext)),
    None => false,
  }
}

/// Every eligible text file under `root`, in walk order
pub fn collect_text_files(root: &Path, layout: &TemplateLayout) -> BootstrapResult<Vec<PathBuf>> {
  let mut files = Vec::new();
  for entry in WalkDir::new(root).sort_by_file_name() {
    let entry = entry?;
    if entry.file_type().is_file() && is_text_file(entry.path(), layout) {
      files.push(entry.into_path());
    }
  }
  Ok(files)
}

/// Apply `plan` to one file, writing only when the content changes
pub fn rewrite_file(path: &Path, plan: &ReplacementPlan) -> BootstrapResult<FileOutcome> {
  let content = match fs::read_to_string(path) {
    Ok(content) => content,
    Err(e) if e.kind() == io::ErrorKind::InvalidData => {
      tracing::debug!(path = %path.display(), "skipping file that is not valid UTF-8");
      return Ok(FileOutcome::Undecodable);
    }
    Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
  };

  let updated = plan.apply(&content);
  if updated == content {
    return Ok(FileOutcome::Unchanged);
  }

  fs::write(path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(FileOutcome::Rewritten)
}

/// Apply `plan` to every eligible text file under `root`
pub fn substitute_tree(
  root: &Path,
  layout: &TemplateLayout,
  plan: &ReplacementPlan,
) -> BootstrapResult<SubstitutionReport> {
  let mut report = SubstitutionReport::default();
  for path in collect_text_files(root, layout)? {
    report.record(rewrite_file(&path, plan)?);
  }
  Ok(report)
}
