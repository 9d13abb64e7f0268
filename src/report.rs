//! # Report Module
//!
//! This module captures the per-file outcomes of a run and can render them
//! as a machine-readable JSON report.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::planner::Decision;

/// The outcome recorded for one processed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// The planner's decision; `None` when processing the file failed
  pub decision: Option<Decision>,
  /// Whether new content was written back to disk
  pub written: bool,
  /// Error message when processing the file failed
  pub error: Option<String>,
}

impl FileReport {
  /// Report for a successfully processed file.
  pub fn processed(path: PathBuf, decision: Decision, written: bool) -> Self {
    Self {
      path,
      decision: Some(decision),
      written,
      error: None,
    }
  }

  /// Report for a file that failed to process.
  pub fn failed(path: PathBuf, error: impl Into<String>) -> Self {
    Self {
      path,
      decision: None,
      written: false,
      error: Some(error.into()),
    }
  }
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Aggregated counts for a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
  pub total: usize,
  pub unchanged: usize,
  pub years_updated: usize,
  pub headers_inserted: usize,
  pub failed: usize,
  pub written: usize,
  pub duration_ms: u128,
}

impl RunSummary {
  /// Builds the summary from individual file reports.
  pub fn from_reports(reports: &[FileReport], elapsed: Duration) -> Self {
    let mut summary = Self {
      total: reports.len(),
      unchanged: 0,
      years_updated: 0,
      headers_inserted: 0,
      failed: 0,
      written: 0,
      duration_ms: elapsed.as_millis(),
    };

    for report in reports {
      match report.decision {
        Some(Decision::Unchanged) => summary.unchanged += 1,
        Some(Decision::YearsUpdated) => summary.years_updated += 1,
        Some(Decision::HeaderInserted) => summary.headers_inserted += 1,
        None => summary.failed += 1,
      }
      if report.written {
        summary.written += 1;
      }
    }

    summary
  }
}

/// The full JSON report document.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  summary: &'a RunSummary,
  files: &'a [FileReport],
}

/// Writes a JSON report of the run to `path`.
pub fn write_json_report(path: &std::path::Path, reports: &[FileReport], summary: &RunSummary) -> Result<()> {
  let document = JsonReport {
    generated_at: chrono::Local::now().to_rfc3339(),
    summary,
    files: reports,
  };

  let content = serde_json::to_string_pretty(&document).context("Failed to serialize JSON report")?;

  std::fs::write(path, content).with_context(|| format!("Failed to write report to {}", path.display()))
}
