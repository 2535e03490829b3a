//! Progress indicators for long-running operations
//!
//! Uses `linya` for allocation-free progress bars

use linya::{Bar, Progress};

/// Progress bar wrapper for file operations
pub struct FileProgress {
  progress: Progress,
  bar: Bar,
}

impl FileProgress {
  /// Create a new progress bar for file transformations
  ///
  /// Returns `None` for an empty batch; linya needs a non-zero total.
  pub fn new(total: usize, label: impl Into<String>) -> Option<Self> {
    if total == 0 {
      return None;
    }
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Some(Self { progress, bar })
  }

  /// Increment progress by 1
  pub fn inc(&mut self) {
    self.progress.inc_and_draw(&self.bar, 1);
  }
}
