//! # Year Merge Module
//!
//! This module provides the pure transform that merges a new year into the
//! year expression of an existing `Copyright (c) <years>` notice and renders
//! the canonical textual form.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Matches a copyright notice followed by a year expression: a run of digits,
/// commas, hyphens, and spaces. Case-insensitive so `(C)` variants are
/// normalized too.
static YEARS_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)Copyright \(c\) ([0-9,\- ]+)").expect("years regex must compile"));

/// Merges a year into existing `Copyright (c) <years>` expressions.
///
/// The captured year expression is split on commas and hyphens into a set of
/// distinct year tokens; the new year joins the set, which is then rendered
/// back as either a single year or a `<min>-<max>` range:
///
/// - `Copyright (c) 2021` merged with `2024` becomes `Copyright (c) 2021-2024`
/// - `Copyright (c) 2021-2023` merged with `2022` is unchanged (2022 is
///   interior, min/max unaffected)
/// - merging a year already present is a no-op (set semantics dedupe)
///
/// Ordering is by string sort. For four-digit years in the same millennium
/// this coincides with numeric order; see the tests for the documented
/// divergence outside that range.
pub struct YearMerger {
  year: String,
  /// Number of notices to rewrite; 0 means all occurrences.
  limit: usize,
}

impl YearMerger {
  /// Creates a merger for the given year that rewrites only the first
  /// matching notice.
  pub fn new(year: impl Into<String>) -> Self {
    Self {
      year: year.into(),
      limit: 1,
    }
  }

  /// Sets how many notices to rewrite (0 = all occurrences).
  #[allow(dead_code)] // Used by library consumers and tests, not in the CLI binary
  pub fn with_limit(mut self, limit: usize) -> Self {
    self.limit = limit;
    self
  }

  /// Merge the year into `content`, returning new text.
  ///
  /// Pure transform: borrows the input unchanged when no notice matches.
  /// Note that a matched segment is always re-rendered, so surrounding
  /// whitespace inside it is normalized even when the year set is unchanged.
  pub fn merge<'a>(&self, content: &'a str) -> Cow<'a, str> {
    YEARS_RE.replacen(content, self.limit, |caps: &regex::Captures| {
      let mut years: BTreeSet<&str> = caps[1]
        .split([',', '-'])
        .map(str::trim)
        .filter(|y| !y.is_empty())
        .collect();
      years.insert(&self.year);

      let first = years.iter().next().copied().unwrap_or(self.year.as_str());
      let last = years.iter().next_back().copied().unwrap_or(self.year.as_str());
      let rendered = if years.len() > 1 {
        format!("{first}-{last}")
      } else {
        first.to_string()
      };

      format!("Copyright (c) {rendered} ")
    })
  }
}
