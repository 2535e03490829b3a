//! Materialize the template into a fresh destination

use crate::core::error::{BootstrapResult, PreconditionError, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

/// Check that a copy from `template` to `destination` may start
///
/// Runs before anything is written, so a failing check leaves the disk as it
/// was, including an already existing destination.
pub fn check_destination(template: &Path, destination: &Path) -> BootstrapResult<()> {
  if !template.is_dir() {
    return Err(
      PreconditionError::TemplateNotFound {
        path: template.to_path_buf(),
      }
      .into(),
    );
  }

  if destination.exists() {
    return Err(
      PreconditionError::DestinationExists {
        path: destination.to_path_buf(),
      }
      .into(),
    );
  }

  let template_abs = fs::canonicalize(template).context("Failed to resolve template directory")?;
  if absolute_destination(destination)?.starts_with(&template_abs) {
    return Err(
      PreconditionError::DestinationInsideTemplate {
        destination: destination.to_path_buf(),
        template: template_abs,
      }
      .into(),
    );
  }

  Ok(())
}

/// Resolve a path that does not exist yet through its nearest existing ancestor
fn absolute_destination(destination: &Path) -> BootstrapResult<PathBuf> {
  let absolute = if destination.is_absolute() {
    destination.to_path_buf()
  } else {
    std::env::current_dir()?.join(destination)
  };

  let mut existing = absolute.as_path();
  let mut rest = Vec::new();
  while !existing.exists() {
    match (existing.parent(), existing.file_name()) {
      (Some(parent), Some(name)) => {
        rest.push(name.to_os_string());
        existing = parent;
      }
      _ => return Ok(absolute),
    }
  }

  let mut resolved = fs::canonicalize(existing)?;
  for name in rest.into_iter().rev() {
    resolved.push(name);
  }
  Ok(resolved)
}

/// Copy the template into `destination`
///
/// Entries named in `excludes` are skipped at any depth; `skip` holds paths
/// relative to the template root that are left out as well. Symlinks are
/// followed and their targets copied. The destination must not exist.
pub fn copy_template(
  template: &Path,
  destination: &Path,
  excludes: &[String],
  skip: &[PathBuf],
) -> BootstrapResult<()> {
  check_destination(template, destination)?;
  tracing::info!(
    template = %template.display(),
    destination = %destination.display(),
    "copying template"
  );
  copy_directory_recursive(template, destination, excludes, skip, Path::new(""))
}

fn copy_directory_recursive(
  source: &Path,
  target: &Path,
  excludes: &[String],
  skip: &[PathBuf],
  relative: &Path,
) -> BootstrapResult<()> {
  fs::create_dir_all(target).with_context(|| format!("Failed to create {}", target.display()))?;

  for entry in fs::read_dir(source).with_context(|| format!("Failed to read {}", source.display()))? {
    let entry = entry?;
    let file_type = entry.file_type()?;
    let file_name = entry.file_name();

    if excludes.iter().any(|e| file_name == e.as_str()) {
      continue;
    }

    let entry_relative = relative.join(&file_name);
    if skip.iter().any(|s| *s == entry_relative) {
      tracing::debug!(path = %entry_relative.display(), "skipping template profile file");
      continue;
    }

    let source_path = entry.path();
    let target_path = target.join(&file_name);

    let is_dir = if file_type.is_symlink() {
      fs::metadata(&source_path)
        .with_context(|| format!("Failed to resolve symlink {}", source_path.display()))?
        .is_dir()
    } else {
      file_type.is_dir()
    };

    if is_dir {
      copy_directory_recursive(&source_path, &target_path, excludes, skip, &entry_relative)?;
    } else {
      fs::copy(&source_path, &target_path).with_context(|| {
        format!(
          "Failed to copy {} to {}",
          source_path.display(),
          target_path.display()
        )
      })?;
    }
  }

  Ok(())
}
