//! # Template Module
//!
//! This module provides functionality for loading the header template,
//! rendering it with copyright data, and reformatting the result as a block
//! of comment lines.
//!
//! A template is plain text with three named placeholders (`{{year}}`,
//! `{{project}}`, and `{{holder}}`) substituted verbatim. No other
//! templating constructs are supported.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::CopyrightInfo;
use crate::verbose_log;

/// A loaded header template.
///
/// Loaded once at the start of a run and rendered once into concrete header
/// text; the rendered text is then independently comment-prefixed when
/// inserted into a file.
pub struct HeaderTemplate {
  template: String,
}

impl HeaderTemplate {
  /// Loads a header template from a file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file does not exist, cannot be read, or is not
  /// valid UTF-8. A failed load is fatal to the run: no files are processed
  /// with a broken template.
  pub fn load(path: &Path) -> Result<Self> {
    verbose_log!("Loading header template from: {}", path.display());

    let template =
      fs::read_to_string(path).with_context(|| format!("Failed to read header template file: {}", path.display()))?;

    Ok(Self { template })
  }

  /// Creates a template directly from text.
  #[allow(dead_code)] // Used by library consumers and tests, not in the CLI binary
  pub fn from_text(text: impl Into<String>) -> Self {
    Self { template: text.into() }
  }

  /// Renders the template with the given copyright data.
  ///
  /// Replaces the `{{year}}`, `{{project}}`, and `{{holder}}` placeholders
  /// with the corresponding values. Unknown placeholders are left untouched.
  pub fn render(&self, info: &CopyrightInfo) -> String {
    self
      .template
      .replace("{{year}}", &info.year)
      .replace("{{project}}", &info.project)
      .replace("{{holder}}", &info.holder)
  }
}

/// Prefixes every line of `text` with the comment marker and a space.
///
/// Blank lines get the marker too, so the whole block is syntactically inert
/// in the target language. Lines are split on `\n`; a trailing newline in the
/// input therefore yields a final bare-marker line.
pub fn apply_comment_prefix(text: &str, prefix: &str) -> String {
  text
    .split('\n')
    .map(|line| format!("{prefix} {line}"))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn info() -> CopyrightInfo {
    CopyrightInfo {
      year: "2025".to_string(),
      project: "Robustimizer".to_string(),
      holder: "Omid Nejadseyfi".to_string(),
    }
  }

  #[test]
  fn test_render_substitutes_all_placeholders() {
    let template = HeaderTemplate::from_text("Copyright (c) {{year}} {{project}}, {{holder}}\nAll rights reserved.");
    let rendered = template.render(&info());

    assert_eq!(
      rendered,
      "Copyright (c) 2025 Robustimizer, Omid Nejadseyfi\nAll rights reserved."
    );
  }

  #[test]
  fn test_render_repeated_placeholder() {
    let template = HeaderTemplate::from_text("{{project}} is {{project}}");
    assert_eq!(template.render(&info()), "Robustimizer is Robustimizer");
  }

  #[test]
  fn test_render_leaves_unknown_placeholders() {
    let template = HeaderTemplate::from_text("{{year}} {{license}}");
    assert_eq!(template.render(&info()), "2025 {{license}}");
  }

  #[test]
  fn test_comment_prefix_every_line() {
    let text = "Copyright (c) 2025 Robustimizer\n\nAll rights reserved.";
    assert_eq!(
      apply_comment_prefix(text, "%"),
      "% Copyright (c) 2025 Robustimizer\n% \n% All rights reserved."
    );
  }

  #[test]
  fn test_comment_prefix_trailing_newline() {
    assert_eq!(apply_comment_prefix("line\n", "%"), "% line\n% ");
  }

  #[test]
  fn test_comment_prefix_other_marker() {
    assert_eq!(apply_comment_prefix("a\nb", "//"), "// a\n// b");
  }

  #[test]
  fn test_load_missing_template_fails() {
    let result = HeaderTemplate::load(Path::new("/nonexistent/copyrightheader.txt"));
    assert!(result.is_err());
  }
}
