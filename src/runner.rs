//! # Runner Module
//!
//! This module resolves the effective file set for a run and applies the
//! planner to each file in turn, sequentially. Processing one file never
//! affects another; a per-file failure follows the configured error policy.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::ErrorPolicy;
use crate::diff::DiffManager;
use crate::exclude::ExclusionList;
use crate::file_io;
use crate::planner::{Decision, UpdatePlanner};
use crate::report::FileReport;
use crate::{info_log, verbose_log};

/// Applies the planner across a resolved file set.
pub struct Runner {
  planner: UpdatePlanner,
  excludes: ExclusionList,
  /// Lowercased extension allow-list, without leading dots
  extensions: Vec<String>,
  root: PathBuf,
  force: bool,
  error_policy: ErrorPolicy,
}

impl Runner {
  pub fn new(
    planner: UpdatePlanner,
    excludes: ExclusionList,
    extensions: Vec<String>,
    root: PathBuf,
    force: bool,
    error_policy: ErrorPolicy,
  ) -> Self {
    let extensions = extensions.into_iter().map(|e| e.to_lowercase()).collect();
    Self {
      planner,
      excludes,
      extensions,
      root,
      force,
      error_policy,
    }
  }

  /// Root directory the runner scans and relativizes against.
  #[allow(dead_code)] // Used by library consumers, not in the CLI binary
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Resolves the effective file set.
  ///
  /// Explicitly given paths are taken as-is. With no explicit paths, the
  /// root directory is scanned recursively, keeping regular files whose
  /// extension is on the allow-list and which the exclusion list does not
  /// prune. The scan is sorted for a stable processing order.
  pub fn resolve_files(&self, explicit: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if !explicit.is_empty() {
      return Ok(explicit.to_vec());
    }

    debug!("Scanning directory: {}", self.root.display());
    let scan_start = Instant::now();

    let mut files = Vec::new();
    for entry in WalkDir::new(&self.root).follow_links(false).sort_by_file_name() {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          eprintln!("Error reading directory entry: {e}");
          continue;
        }
      };

      if !entry.file_type().is_file() {
        continue;
      }

      let path = entry.path();
      if !self.has_allowed_extension(path) {
        continue;
      }

      if self.excludes.is_excluded(path, &self.root) {
        verbose_log!("Skipping: {} (matches exclusion rule)", path.display());
        continue;
      }

      files.push(path.to_path_buf());
    }

    debug!(
      "Found {} files in {}ms",
      files.len(),
      scan_start.elapsed().as_millis()
    );

    Ok(files)
  }

  fn has_allowed_extension(&self, path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
      return false;
    };
    let ext = ext.to_lowercase();
    self.extensions.iter().any(|allowed| *allowed == ext)
  }

  /// Processes the files sequentially, writing back changed content.
  ///
  /// Each file is read, planned, and (when the content changed or `force` is
  /// set) atomically rewritten before the next file is started. A per-file
  /// error is recorded and skipped or aborts the run, per the policy.
  pub fn run(&self, files: &[PathBuf]) -> Result<Vec<FileReport>> {
    let mut reports = Vec::with_capacity(files.len());

    for path in files {
      match self.process_file(path) {
        Ok(report) => reports.push(report),
        Err(e) => match self.error_policy {
          ErrorPolicy::Skip => {
            verbose_log!("Skipping {} after error: {e:#}", path.display());
            reports.push(FileReport::failed(path.clone(), format!("{e:#}")));
          }
          ErrorPolicy::Fail => {
            return Err(e).with_context(|| format!("Failed processing {}", path.display()));
          }
        },
      }
    }

    Ok(reports)
  }

  fn process_file(&self, path: &Path) -> Result<FileReport> {
    let original = file_io::read_content(path)?;
    let plan = self.planner.plan(&original);

    let changed = self.force || plan.decision != Decision::Unchanged;
    if changed {
      file_io::write_atomic(path, &plan.content)?;
      info_log!("Updating file: {}", path.display());
    } else {
      verbose_log!("No changes needed in file: {}", path.display());
    }

    Ok(FileReport::processed(path.to_path_buf(), plan.decision, changed))
  }

  /// Read-only preview pass used by dry-run diff output.
  ///
  /// Plans each file and renders the diff of what a real run would change;
  /// never writes to any processed file. Unreadable files are reported the
  /// same way as in a real run, per the error policy.
  pub fn preview(&self, files: &[PathBuf], diff: &DiffManager) -> Result<Vec<FileReport>> {
    let mut reports = Vec::with_capacity(files.len());

    for path in files {
      let original = match file_io::read_content(path) {
        Ok(content) => content,
        Err(e) => match self.error_policy {
          ErrorPolicy::Skip => {
            reports.push(FileReport::failed(path.clone(), format!("{e:#}")));
            continue;
          }
          ErrorPolicy::Fail => {
            return Err(e).with_context(|| format!("Failed processing {}", path.display()));
          }
        },
      };

      let plan = self.planner.plan(&original);
      if plan.decision != Decision::Unchanged {
        diff.display_diff(path, &original, &plan.content)?;
      }
      reports.push(FileReport::processed(path.to_path_buf(), plan.decision, false));
    }

    Ok(reports)
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;
  use crate::config::CopyrightInfo;
  use crate::exclude::MatchMode;
  use crate::template::{HeaderTemplate, apply_comment_prefix};

  fn test_planner() -> UpdatePlanner {
    let info = CopyrightInfo {
      year: "2025".to_string(),
      project: "Robustimizer".to_string(),
      holder: "Omid Nejadseyfi".to_string(),
    };
    let template = HeaderTemplate::from_text("Copyright (c) {{year}} {{project}}, {{holder}}");
    let header = apply_comment_prefix(&template.render(&info), "%");
    UpdatePlanner::new(&info, header)
  }

  fn test_runner(root: PathBuf, excludes: ExclusionList, force: bool) -> Runner {
    Runner::new(
      test_planner(),
      excludes,
      vec!["m".to_string()],
      root,
      force,
      ErrorPolicy::Skip,
    )
  }

  #[test]
  fn test_scan_filters_by_extension_and_exclusion() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();

    fs::create_dir_all(root.join("src")).expect("mkdir");
    fs::create_dir_all(root.join("third_party")).expect("mkdir");
    fs::write(root.join("src/a.m"), "x = 1;\n").expect("write");
    fs::write(root.join("src/skipme.m"), "x = 1;\n").expect("write");
    fs::write(root.join("src/notes.txt"), "not code").expect("write");
    fs::write(root.join("third_party/b.m"), "y = 2;\n").expect("write");

    let excludes = ExclusionList::from_rules(
      vec!["third_party".to_string(), "skipme.m".to_string()],
      MatchMode::Prefix,
    );
    let runner = test_runner(root.to_path_buf(), excludes, false);

    let files = runner.resolve_files(&[]).expect("resolve");
    let names: Vec<_> = files
      .iter()
      .map(|p| p.strip_prefix(root).expect("relative").display().to_string())
      .collect();
    assert_eq!(names, vec!["src/a.m".to_string()]);
  }

  #[test]
  fn test_explicit_files_bypass_scan() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("only.m");
    fs::write(&path, "x = 1;\n").expect("write");

    let runner = test_runner(dir.path().to_path_buf(), ExclusionList::default(), false);
    let files = runner.resolve_files(std::slice::from_ref(&path)).expect("resolve");
    assert_eq!(files, vec![path]);
  }

  #[test]
  fn test_run_inserts_and_reports() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("a.m");
    fs::write(&path, "x = 1;\n").expect("write");

    let runner = test_runner(dir.path().to_path_buf(), ExclusionList::default(), false);
    let reports = runner.run(std::slice::from_ref(&path)).expect("run");

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].decision, Some(Decision::HeaderInserted));
    assert!(reports[0].written);

    let content = fs::read_to_string(&path).expect("read");
    assert_eq!(content, "% Copyright (c) 2025 Robustimizer, Omid Nejadseyfi\nx = 1;\n");
  }

  #[test]
  fn test_second_run_converges() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("a.m");
    fs::write(&path, "% Copyright (c) 2021 Robustimizer, Omid Nejadseyfi\nx = 1;\n").expect("write");

    let runner = test_runner(dir.path().to_path_buf(), ExclusionList::default(), false);

    let first = runner.run(std::slice::from_ref(&path)).expect("first run");
    assert_eq!(first[0].decision, Some(Decision::YearsUpdated));

    let second = runner.run(std::slice::from_ref(&path)).expect("second run");
    assert_eq!(second[0].decision, Some(Decision::Unchanged));
    assert!(!second[0].written);

    let content = fs::read_to_string(&path).expect("read");
    assert_eq!(content, "% Copyright (c) 2021-2025 Robustimizer, Omid Nejadseyfi\nx = 1;\n");
  }

  #[test]
  fn test_force_writes_identical_bytes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("a.m");
    let converged = "% Copyright (c) 2021-2025 Robustimizer, Omid Nejadseyfi\nx = 1;\n";
    fs::write(&path, converged).expect("write");

    let runner = test_runner(dir.path().to_path_buf(), ExclusionList::default(), true);
    let reports = runner.run(std::slice::from_ref(&path)).expect("run");

    assert_eq!(reports[0].decision, Some(Decision::Unchanged));
    assert!(reports[0].written);
    assert_eq!(fs::read_to_string(&path).expect("read"), converged);
  }

  #[test]
  fn test_unreadable_file_is_skipped_and_recorded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let good = dir.path().join("good.m");
    let missing = dir.path().join("missing.m");
    fs::write(&good, "x = 1;\n").expect("write");

    let runner = test_runner(dir.path().to_path_buf(), ExclusionList::default(), false);
    let reports = runner.run(&[missing.clone(), good.clone()]).expect("run");

    assert_eq!(reports.len(), 2);
    assert!(reports[0].error.is_some());
    assert_eq!(reports[1].decision, Some(Decision::HeaderInserted));
  }

  #[test]
  fn test_fail_fast_policy_aborts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let good = dir.path().join("good.m");
    let missing = dir.path().join("missing.m");
    fs::write(&good, "x = 1;\n").expect("write");

    let runner = Runner::new(
      test_planner(),
      ExclusionList::default(),
      vec!["m".to_string()],
      dir.path().to_path_buf(),
      false,
      ErrorPolicy::Fail,
    );

    assert!(runner.run(&[missing, good.clone()]).is_err());
    // The good file was never reached
    assert_eq!(fs::read_to_string(&good).expect("read"), "x = 1;\n");
  }

  #[test]
  fn test_preview_never_writes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("a.m");
    fs::write(&path, "x = 1;\n").expect("write");

    let diff_path = dir.path().join("changes.diff");
    let diff = DiffManager::new(false, Some(diff_path.clone()));

    let runner = test_runner(dir.path().to_path_buf(), ExclusionList::default(), true);
    let reports = runner.preview(std::slice::from_ref(&path), &diff).expect("preview");

    assert_eq!(reports[0].decision, Some(Decision::HeaderInserted));
    assert!(!reports[0].written);
    assert_eq!(fs::read_to_string(&path).expect("read"), "x = 1;\n");
    assert!(std::fs::read_to_string(&diff_path).expect("diff").contains("+% Copyright"));
  }
}
