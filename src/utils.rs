//! Utility functions for dotted names and path display

use std::path::{Path, PathBuf};

/// Convert a dotted package name into a relative directory path
///
/// `dev.goquick.app` becomes `dev/goquick/app` (platform separators).
/// Empty segments are dropped; callers validate names before relocation.
pub fn package_path(dotted: &str) -> PathBuf {
  dotted.split('.').filter(|segment| !segment.is_empty()).collect()
}

/// Last segment of a dotted name (`dev.example.hello` -> `hello`)
pub fn last_segment(dotted: &str) -> &str {
  dotted.rsplit('.').next().unwrap_or(dotted)
}

/// Check that a dotted name has at least one segment and no empty ones
pub fn is_dotted_identifier(dotted: &str) -> bool {
  !dotted.is_empty()
    && dotted.split('.').all(|segment| {
      !segment.is_empty()
        && !segment.contains(['/', '\\'])
        && !segment.chars().any(char::is_whitespace)
    })
}

/// Display `path` relative to `root` when possible, for console output
pub fn display_relative(path: &Path, root: &Path) -> String {
  path.strip_prefix(root).unwrap_or(path).display().to_string()
}
