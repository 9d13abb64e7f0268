//! # File I/O Module
//!
//! This module provides file reading and writing utilities. Writes go
//! through a temporary file in the target directory followed by an atomic
//! rename, so a crash mid-write never leaves a truncated file behind.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

/// Read full file content.
pub fn read_content(path: &Path) -> Result<String> {
  std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Write file content atomically.
///
/// The content is written to a temporary file in the same directory as the
/// target, then renamed over it. The temporary file is removed on every
/// failure path when it goes out of scope.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut tmp = tempfile::Builder::new()
    .prefix(".rehead-")
    .tempfile_in(dir)
    .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

  tmp
    .write_all(content.as_bytes())
    .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
  tmp
    .flush()
    .with_context(|| format!("Failed to flush temporary file for {}", path.display()))?;

  tmp
    .persist(path)
    .with_context(|| format!("Failed to replace file: {}", path.display()))?;

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_write_then_read_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.m");

    write_atomic(&path, "% header\ncontent\n").expect("write");
    assert_eq!(read_content(&path).expect("read"), "% header\ncontent\n");
  }

  #[test]
  fn test_write_replaces_existing_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.m");

    std::fs::write(&path, "old").expect("seed");
    write_atomic(&path, "new").expect("write");
    assert_eq!(read_content(&path).expect("read"), "new");
  }

  #[test]
  fn test_no_temporary_left_behind() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.m");

    write_atomic(&path, "content").expect("write");

    let names: Vec<_> = std::fs::read_dir(dir.path())
      .expect("read_dir")
      .filter_map(|e| e.ok())
      .map(|e| e.file_name().to_string_lossy().to_string())
      .collect();
    assert_eq!(names, vec!["out.m".to_string()]);
  }

  #[test]
  fn test_read_missing_file_fails() {
    assert!(read_content(Path::new("/nonexistent/file.m")).is_err());
  }
}
