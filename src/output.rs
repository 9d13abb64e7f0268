//! # Output Module
//!
//! This module centralizes user-facing output for the rehead tool. It
//! provides consistent formatting, colors, and symbols for terminal output,
//! keeping stdout predictable for piping and automation.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileReport, RunSummary};

/// Symbols used in output
pub mod symbols {
  /// Success / nothing to do
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Year range updated
  pub const UPDATED: &str = "\u{21bb}"; // ↻
  /// Header inserted
  pub const ADDED: &str = "+";
}

/// Maximum number of files to show in a list before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the initial "Updating N files..." message.
pub fn print_start_message(file_count: usize, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let verb = if dry_run { "Would update" } else { "Updating" };
  let files_word = if file_count == 1 { "file" } else { "files" };

  println!("{verb} {file_count} {files_word}...");
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the resolved file set, one path per line (dry-run mode).
///
/// Plain paths on stdout so the list can be piped into other tools.
pub fn print_resolved_files(files: &[std::path::PathBuf]) {
  for file in files {
    println!("{}", file.display());
  }
}

/// Print the "all files up to date" success line.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All files already have an up-to-date header",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

fn print_file_list(files: &[&FileReport], workspace_root: Option<&Path>) {
  let mut sorted_files: Vec<_> = files.to_vec();
  sorted_files.sort_by(|a, b| a.path.cmp(&b.path));

  let count = sorted_files.len();
  let show_all = is_verbose();
  let effective_limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in sorted_files.iter().take(effective_limit) {
    println!("  {}", make_relative_path(&file.path, workspace_root));
  }

  if !show_all && count > effective_limit {
    let remaining = count - effective_limit;
    println!("  ... and {remaining} more (use -v to see all)");
  }
}

/// Print the list of files that had a header inserted.
pub fn print_inserted_files(files: &[&FileReport], workspace_root: Option<&Path>) {
  if is_quiet() || files.is_empty() {
    return;
  }

  let count = files.len();
  println!(
    "{} Inserted header into {} {}:",
    symbols::ADDED.if_supports_color(Stream::Stdout, |s| s.green()),
    count,
    if count == 1 { "file" } else { "files" }
  );
  print_file_list(files, workspace_root);
}

/// Print the list of files whose year range was updated.
pub fn print_updated_files(files: &[&FileReport], workspace_root: Option<&Path>) {
  if is_quiet() || files.is_empty() {
    return;
  }

  let count = files.len();
  println!(
    "{} Updated years in {} {}:",
    symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()),
    count,
    if count == 1 { "file" } else { "files" }
  );
  print_file_list(files, workspace_root);
}

/// Print the list of files that failed to process.
///
/// Failures are printed even in quiet mode; each line carries the recorded
/// error message.
pub fn print_failed_files(files: &[&FileReport], workspace_root: Option<&Path>) {
  if files.is_empty() {
    return;
  }

  let count = files.len();
  eprintln!(
    "{} Failed to process {} {}:",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    count,
    if count == 1 { "file" } else { "files" }
  );

  let mut sorted_files: Vec<_> = files.to_vec();
  sorted_files.sort_by(|a, b| a.path.cmp(&b.path));

  for file in &sorted_files {
    let reason = file.error.as_deref().unwrap_or("unknown error");
    eprintln!("  {}: {}", make_relative_path(&file.path, workspace_root), reason);
  }
}

/// Print the run summary line.
pub fn print_summary(summary: &RunSummary) {
  if is_quiet() {
    return;
  }

  println!(
    "Processed {} files in {}ms: {} inserted, {} updated, {} unchanged, {} failed",
    summary.total, summary.duration_ms, summary.headers_inserted, summary.years_updated, summary.unchanged,
    summary.failed
  );
}

/// Render a path relative to the workspace root when possible.
fn make_relative_path(path: &Path, workspace_root: Option<&Path>) -> String {
  if let Some(root) = workspace_root
    && let Ok(relative) = path.strip_prefix(root)
  {
    return relative.display().to_string();
  }

  path.display().to_string()
}
