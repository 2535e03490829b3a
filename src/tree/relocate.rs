//! Move package directories from the template's dotted package to the new one

use crate::core::error::{BootstrapResult, ResultExt};
use crate::utils;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A package directory moved under one source root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relocation {
  pub root: PathBuf,
  pub from: PathBuf,
  pub to: PathBuf,
}

/// Relocate `old_package` to `new_package` under every source root
///
/// Roots (relative to `dest`) that do not exist, or that do not contain the
/// old package, are skipped. An existing directory at the new package path is
/// replaced wholesale.
pub fn relocate_packages(
  dest: &Path,
  roots: &[PathBuf],
  old_package: &str,
  new_package: &str,
) -> BootstrapResult<Vec<Relocation>> {
  let old_parts = utils::package_path(old_package);
  let new_parts = utils::package_path(new_package);
  let mut relocated = Vec::new();

  if old_parts == new_parts {
    return Ok(relocated);
  }

  for relative in roots {
    let base = dest.join(relative);
    let old_dir = base.join(&old_parts);
    if !old_dir.is_dir() {
      tracing::debug!(root = %relative.display(), "no template package under source root");
      continue;
    }

    let target_dir = base.join(&new_parts);
    move_package(&base, &old_dir, &target_dir, new_package)?;

    if let Some(parent) = old_dir.parent() {
      prune_empty_parents(parent, &base)?;
    }

    relocated.push(Relocation {
      root: relative.clone(),
      from: old_parts.clone(),
      to: new_parts.clone(),
    });
  }

  Ok(relocated)
}

/// Move `old_dir` to `target_dir` through a staging directory under `base`
///
/// Staging lets either package nest inside the other: the old tree is out of
/// the way before the target is cleared, and the target's parents can be
/// created inside what used to be the old tree.
fn move_package(base: &Path, old_dir: &Path, target_dir: &Path, new_package: &str) -> BootstrapResult<()> {
  let staging = base.join(format!(".relocating-{}", new_package));
  if staging.exists() {
    fs::remove_dir_all(&staging).with_context(|| format!("Failed to clear {}", staging.display()))?;
  }

  fs::rename(old_dir, &staging).with_context(|| {
    format!("Failed to move {} to {}", old_dir.display(), staging.display())
  })?;

  if target_dir.is_dir() {
    tracing::debug!(path = %target_dir.display(), "replacing existing package directory");
    fs::remove_dir_all(target_dir).with_context(|| format!("Failed to remove {}", target_dir.display()))?;
  } else if target_dir.exists() {
    fs::remove_file(target_dir).with_context(|| format!("Failed to remove {}", target_dir.display()))?;
  }

  if let Some(parent) = target_dir.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }

  fs::rename(&staging, target_dir).with_context(|| {
    format!("Failed to move {} to {}", staging.display(), target_dir.display())
  })?;

  Ok(())
}

/// Remove empty directories from `start` upward, never removing `stop`
fn prune_empty_parents(start: &Path, stop: &Path) -> BootstrapResult<()> {
  let mut current = start;
  while current != stop && current.starts_with(stop) {
    if !current.is_dir() || fs::read_dir(current)?.next().is_some() {
      break;
    }
    fs::remove_dir(current).with_context(|| format!("Failed to remove {}", current.display()))?;
    match current.parent() {
      Some(parent) => current = parent,
      None => break,
    }
  }
  Ok(())
}
