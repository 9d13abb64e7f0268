//! # Configuration Module
//!
//! This module provides configuration support for rehead, allowing users to
//! set default copyright data, the comment prefix, the extension allow-list,
//! and the per-file error policy.
//!
//! Configuration can be specified in a `.rehead.toml` file or via the
//! `REHEAD_CONFIG` environment variable. Command-line flags always take
//! precedence over configuration values.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Datelike;
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".rehead.toml";

/// Environment variable for specifying the config file path.
pub const CONFIG_ENV_VAR: &str = "REHEAD_CONFIG";

/// Default project name stamped into (and searched for in) headers.
pub const DEFAULT_PROJECT: &str = "Robustimizer";

/// Default copyright holder.
pub const DEFAULT_HOLDER: &str = "Omid Nejadseyfi";

/// Default comment prefix placed before every header line.
pub const DEFAULT_COMMENT_PREFIX: &str = "%";

/// Default name of the exclusion list file, looked up in the scan root.
pub const DEFAULT_EXCLUDE_FILENAME: &str = "excludes.txt";

/// Default header template file name, looked up in the scan root.
pub const DEFAULT_TEMPLATE_FILENAME: &str = "copyrightheader.txt";

/// Extensions scanned when no explicit file list is given and neither the CLI
/// nor the config narrows the set.
pub const DEFAULT_EXTENSIONS: &[&str] = &["m"];

/// Copyright data used for both detecting existing headers (by project name)
/// and rendering new ones.
///
/// Constructed once at the start of a run and read-only thereafter. Defaults
/// come from the current calendar year and the fixed project/holder strings;
/// every field can be overridden by the caller so tests never need to touch
/// the process clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyrightInfo {
  /// The copyright year to stamp or merge into headers
  pub year: String,
  /// The project name whose presence marks a header as ours
  pub project: String,
  /// The copyright holder written into new headers
  pub holder: String,
}

impl CopyrightInfo {
  /// Resolve copyright data from CLI overrides, config values, and defaults,
  /// in that precedence order.
  pub fn resolve(
    year: Option<String>,
    project: Option<String>,
    holder: Option<String>,
    config: Option<&Config>,
  ) -> Self {
    let cfg_project = config.and_then(|c| c.project.clone());
    let cfg_holder = config.and_then(|c| c.holder.clone());

    Self {
      year: year.unwrap_or_else(current_year),
      project: project.or(cfg_project).unwrap_or_else(|| DEFAULT_PROJECT.to_string()),
      holder: holder.or(cfg_holder).unwrap_or_else(|| DEFAULT_HOLDER.to_string()),
    }
  }
}

impl Default for CopyrightInfo {
  fn default() -> Self {
    Self::resolve(None, None, None, None)
  }
}

/// The current calendar year as a string.
pub fn current_year() -> String {
  chrono::Local::now().year().to_string()
}

/// Policy for errors confined to a single file (unreadable, unwritable).
///
/// Setup errors (template or exclusion list unreadable) are always fatal and
/// abort before any file is touched; this policy only governs what happens
/// once per-file processing has started.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
  /// Record the failure for that file and continue with the rest (default)
  #[default]
  Skip,
  /// Abort the run on the first per-file error
  Fail,
}

/// Main configuration struct for rehead.
///
/// This struct is loaded from a `.rehead.toml` file and contains the
/// user-configurable defaults. Every field is optional; absent fields fall
/// back to the built-in defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
  /// Default project name for detection and rendering.
  #[serde(default)]
  pub project: Option<String>,

  /// Default copyright holder for new headers.
  #[serde(default)]
  pub holder: Option<String>,

  /// Comment prefix placed before every line of an inserted header.
  #[serde(default, rename = "comment-prefix")]
  pub comment_prefix: Option<String>,

  /// Extension allow-list (without leading dots) for the recursive scan.
  #[serde(default)]
  pub extensions: Option<Vec<String>>,

  /// Path to the exclusion list file.
  #[serde(default, rename = "exclude-file")]
  pub exclude_file: Option<PathBuf>,

  /// Path to the header template file.
  #[serde(default)]
  pub template: Option<PathBuf>,

  /// Per-file error policy: "skip" (default) or "fail".
  #[serde(default, rename = "on-error")]
  pub on_error: Option<ErrorPolicy>,

  /// Align exclusion prefix matches to path-segment boundaries.
  #[serde(default, rename = "segment-boundaries")]
  pub segment_boundaries: Option<bool>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A configuration value is invalid.
  #[error("Invalid config value for '{field}': {message}")]
  InvalidValue { field: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that the comment prefix is non-empty and that extension entries
  /// don't include the leading dot.
  fn validate(&self) -> Result<(), ConfigError> {
    if let Some(ref prefix) = self.comment_prefix
      && prefix.is_empty()
    {
      return Err(ConfigError::InvalidValue {
        field: "comment-prefix".to_string(),
        message: "comment prefix cannot be empty".to_string(),
      });
    }

    if let Some(ref extensions) = self.extensions {
      for ext in extensions {
        if ext.starts_with('.') {
          return Err(ConfigError::InvalidValue {
            field: "extensions".to_string(),
            message: format!("extension '{ext}' should not include leading dot"),
          });
        }
      }
    }

    Ok(())
  }
}

/// Discover and load the configuration file.
///
/// The configuration file is discovered in the following order:
/// 1. The explicit `--config` path (an error if missing)
/// 2. The `REHEAD_CONFIG` environment variable (an error if missing)
/// 3. `.rehead.toml` in the given root directory (silently absent)
///
/// Returns `Ok(None)` when no config file exists or `no_config` is set.
pub fn load_config(explicit: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Skipping config file (--no-config)");
    return Ok(None);
  }

  if let Some(path) = explicit {
    return Ok(Some(Config::load(path)?));
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    return Ok(Some(Config::load(Path::new(&env_path))?));
  }

  let default_path = root.join(DEFAULT_CONFIG_FILENAME);
  if default_path.is_file() {
    return Ok(Some(Config::load(&default_path)?));
  }

  Ok(None)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_copyright_info_overrides_win() {
    let config = Config {
      project: Some("Configured".to_string()),
      holder: Some("Config Holder".to_string()),
      ..Config::default()
    };

    let info = CopyrightInfo::resolve(
      Some("2030".to_string()),
      Some("Override".to_string()),
      None,
      Some(&config),
    );

    assert_eq!(info.year, "2030");
    assert_eq!(info.project, "Override");
    assert_eq!(info.holder, "Config Holder");
  }

  #[test]
  fn test_copyright_info_defaults() {
    let info = CopyrightInfo::resolve(Some("2030".to_string()), None, None, None);

    assert_eq!(info.project, DEFAULT_PROJECT);
    assert_eq!(info.holder, DEFAULT_HOLDER);
  }

  #[test]
  fn test_parse_full_config() {
    let config: Config = toml::from_str(
      r#"
        project = "Demo"
        holder = "Demo Org"
        comment-prefix = "//"
        extensions = ["m", "py"]
        exclude-file = "skip.txt"
        on-error = "fail"
        segment-boundaries = true
      "#,
    )
    .expect("config should parse");

    assert_eq!(config.project.as_deref(), Some("Demo"));
    assert_eq!(config.comment_prefix.as_deref(), Some("//"));
    assert_eq!(config.extensions.as_deref(), Some(&["m".to_string(), "py".to_string()][..]));
    assert_eq!(config.on_error, Some(ErrorPolicy::Fail));
    assert_eq!(config.segment_boundaries, Some(true));
  }

  #[test]
  fn test_validate_rejects_dotted_extension() {
    let config = Config {
      extensions: Some(vec![".m".to_string()]),
      ..Config::default()
    };

    assert!(config.validate().is_err());
  }

  #[test]
  fn test_validate_rejects_empty_prefix() {
    let config = Config {
      comment_prefix: Some(String::new()),
      ..Config::default()
    };

    assert!(config.validate().is_err());
  }
}
