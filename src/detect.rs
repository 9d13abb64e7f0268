//! # Header Detection Module
//!
//! This module contains the interfaces and implementations for copyright
//! header detection. It allows for replacing the detection algorithm without
//! modifying the planner.

/// Number of bytes inspected at the top of a file when looking for an
/// existing header. Headers are assumed to be near the top of the file.
pub const HEADER_LOOKAHEAD: usize = 2000;

/// Trait for header detectors.
///
/// Implementations of this trait are responsible for determining whether a
/// file already contains a copyright header for the given project, based on
/// its content.
pub trait HeaderDetector: Send + Sync {
  /// Checks if the content already has a copyright header for `project`.
  fn has_header(&self, content: &str, project: &str) -> bool;
}

/// Default implementation of header detection.
///
/// This detector checks a bounded window at the start of the content for two
/// literal, case-sensitive substrings: `"Copyright"` and the project name.
/// Both must occur inside the window for the content to count as headed.
///
/// This is a cheap heuristic rather than a structural parse: any text that
/// happens to contain both substrings inside the window counts as a header.
/// That false-positive risk is accepted; such files are treated as already
/// headed and only their year is touched.
pub struct WindowedDetector {
  lookahead: usize,
}

impl WindowedDetector {
  /// Creates a detector with the default lookahead of [`HEADER_LOOKAHEAD`]
  /// bytes.
  pub const fn new() -> Self {
    Self {
      lookahead: HEADER_LOOKAHEAD,
    }
  }

  /// Creates a detector with a custom lookahead bound.
  #[allow(dead_code)] // Used by library consumers and tests, not in the CLI binary
  pub const fn with_lookahead(lookahead: usize) -> Self {
    Self { lookahead }
  }
}

impl Default for WindowedDetector {
  fn default() -> Self {
    Self::new()
  }
}

impl HeaderDetector for WindowedDetector {
  fn has_header(&self, content: &str, project: &str) -> bool {
    let mut end = content.len().min(self.lookahead);
    // Clamp to a UTF-8 boundary so the slice below cannot panic
    while !content.is_char_boundary(end) {
      end -= 1;
    }
    let window = &content[..end];

    window.contains("Copyright") && window.contains(project)
  }
}
