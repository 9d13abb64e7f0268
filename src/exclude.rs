//! # Exclusion Module
//!
//! This module contains functionality for loading the exclusion list and
//! deciding which candidate files are pruned from a run.
//!
//! Rules are plain strings, one per line. A rule matches a file either as an
//! exact filename or as a prefix of the file's directory path relative to
//! the project root. Blank lines and `#` comment lines are dropped at load
//! time.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::verbose_log;

/// How directory-prefix rules are matched against the directory component.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
  /// Literal string prefix: rule `foo` matches `foo/` and `foobar/`.
  /// Compatibility default.
  #[default]
  Prefix,
  /// Prefix aligned to path-segment boundaries: rule `foo` matches `foo/`
  /// but not `foobar/`.
  Segment,
}

/// An ordered set of exclusion rules plus the match mode applied to them.
#[derive(Debug, Clone, Default)]
pub struct ExclusionList {
  rules: Vec<String>,
  mode: MatchMode,
}

impl ExclusionList {
  /// Creates an exclusion list from in-memory rules.
  pub fn from_rules(rules: Vec<String>, mode: MatchMode) -> Self {
    Self { rules, mode }
  }

  /// Loads exclusion rules from a file, dropping blank lines and lines
  /// starting with `#`.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read. Callers decide whether a
  /// missing file is fatal (explicitly specified) or yields an empty list
  /// (default location absent).
  pub fn load(path: &Path, mode: MatchMode) -> Result<Self> {
    verbose_log!("Loading exclusion list from: {}", path.display());

    let content =
      std::fs::read_to_string(path).with_context(|| format!("Failed to read exclusion list: {}", path.display()))?;

    Ok(Self::from_rules(parse_rules(&content), mode))
  }

  /// Number of loaded rules.
  pub fn len(&self) -> usize {
    self.rules.len()
  }

  /// Whether the list has no rules.
  #[allow(dead_code)] // Used by library consumers, not in the CLI binary
  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  /// Decides whether `path` is excluded, judged relative to `root`.
  ///
  /// The relative path is split into its directory component and filename
  /// component. A rule matches either the filename exactly, or the directory
  /// component by prefix (per the configured [`MatchMode`]). A rule never
  /// matches a partial filename.
  pub fn is_excluded(&self, path: &Path, root: &Path) -> bool {
    if self.rules.is_empty() {
      return false;
    }

    let rel = relative_to(path, root);

    let dir = rel
      .parent()
      .map(|p| p.to_string_lossy().replace('\\', "/"))
      .unwrap_or_default();
    let Some(name) = rel.file_name().map(|n| n.to_string_lossy()) else {
      return false;
    };

    for rule in &self.rules {
      if name == rule.as_str() {
        return true;
      }

      let dir_matches = match self.mode {
        MatchMode::Prefix => dir.starts_with(rule.as_str()),
        MatchMode::Segment => dir == rule.as_str() || dir.starts_with(&format!("{rule}/")),
      };
      if dir_matches {
        return true;
      }
    }

    false
  }
}

/// Parses rule lines: trims whitespace, drops blanks and `#` comments.
fn parse_rules(content: &str) -> Vec<String> {
  content
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty() && !line.starts_with('#'))
    .map(str::to_string)
    .collect()
}

/// Makes `path` relative to `root` where possible.
fn relative_to(path: &Path, root: &Path) -> PathBuf {
  if let Ok(stripped) = path.strip_prefix(root) {
    return stripped.to_path_buf();
  }

  if path.is_absolute()
    && let Some(diffed) = pathdiff::diff_paths(path, root)
  {
    return diffed;
  }

  path.to_path_buf()
}
