//! # Diff Module
//!
//! This module contains functionality for rendering diffs between original
//! and planned content. It's used in dry-run mode to preview what a real run
//! would change without touching any file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use similar::{ChangeTag, TextDiff};

/// Renders diffs of planned header changes.
///
/// If `show_diff` is enabled, diffs are printed to stderr. If
/// `save_diff_path` is set, diffs from all files are appended to that one
/// file, producing a single consolidated diff.
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// Path to append diffs to
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output was requested.
  pub const fn is_active(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Renders the diff between `original` and `new` for one file.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    let diff = TextDiff::from_lines(original, new);

    let mut diff_content = String::new();
    diff_content.push_str(&format!("Diff for {}:\n", path.display()));

    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      diff_content.push_str(&format!("{sign}{change}"));
    }
    diff_content.push('\n');

    if self.show_diff {
      eprint!("{diff_content}");
    }

    if let Some(ref diff_path) = self.save_diff_path {
      match OpenOptions::new().create(true).append(true).open(diff_path) {
        Ok(mut file) => {
          if let Err(e) = file.write_all(diff_content.as_bytes()) {
            eprintln!("Error writing to diff file: {e}");
          }
        }
        Err(e) => {
          eprintln!("Error opening diff file: {e}");
        }
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_diff_appends_to_save_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let diff_path = dir.path().join("changes.diff");

    let manager = DiffManager::new(false, Some(diff_path.clone()));
    manager
      .display_diff(Path::new("a.m"), "x = 1;\n", "% header\nx = 1;\n")
      .expect("diff");
    manager
      .display_diff(Path::new("b.m"), "y = 2;\n", "% header\ny = 2;\n")
      .expect("diff");

    let content = std::fs::read_to_string(&diff_path).expect("read diff");
    assert!(content.contains("Diff for a.m:"));
    assert!(content.contains("Diff for b.m:"));
    assert!(content.contains("+% header"));
    assert!(content.contains(" x = 1;"));
  }

  #[test]
  fn test_inactive_manager() {
    let manager = DiffManager::new(false, None);
    assert!(!manager.is_active());

    let manager = DiffManager::new(true, None);
    assert!(manager.is_active());
  }
}
