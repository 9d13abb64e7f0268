//! # Update Command
//!
//! This module implements the header update run: resolve configuration and
//! copyright data, load the template and exclusion list (both fatal when
//! broken), resolve the file set, and apply the planner to each file.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::config::{
  Config, CopyrightInfo, DEFAULT_COMMENT_PREFIX, DEFAULT_EXCLUDE_FILENAME, DEFAULT_EXTENSIONS,
  DEFAULT_TEMPLATE_FILENAME, ErrorPolicy, load_config,
};
use crate::diff::DiffManager;
use crate::exclude::{ExclusionList, MatchMode};
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  print_all_files_ok, print_blank_line, print_failed_files, print_inserted_files, print_resolved_files,
  print_start_message, print_summary, print_updated_files,
};
use crate::planner::UpdatePlanner;
use crate::report::{FileReport, RunSummary, write_json_report};
use crate::runner::Runner;
use crate::template::{HeaderTemplate, apply_comment_prefix};
use crate::{info_log, verbose_log};

/// Arguments for the update run
#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
  /// Files to update. When not specified, all matching files under the
  /// current directory are updated (recursively), minus exclusions.
  #[arg(required = false)]
  pub files: Vec<PathBuf>,

  /// The copyright year to update to [default: the current year]
  #[arg(long)]
  pub year: Option<String>,

  /// The project name used to recognize and render headers
  #[arg(long)]
  pub project: Option<String>,

  /// The copyright holder written into new headers
  #[arg(long)]
  pub holder: Option<String>,

  /// An alternative template file for the copyright header
  #[arg(long, short = 't', value_name = "FILE")]
  pub template: Option<PathBuf>,

  /// A file listing exclusion rules, one per line (directory prefixes or
  /// exact filenames; blank and '#' lines ignored)
  #[arg(long, value_name = "FILE")]
  pub exclude_file: Option<PathBuf>,

  /// Only scan files with these extensions (repeatable, case-insensitive)
  #[arg(long, value_name = "EXT")]
  pub ext: Vec<String>,

  /// Comment prefix placed before every header line
  #[arg(long, value_name = "PREFIX")]
  pub comment_prefix: Option<String>,

  /// Update files even when their header is already up to date
  #[arg(long)]
  pub force: bool,

  /// Print the files that would be updated, but do not update them
  #[arg(long)]
  pub dry_run: bool,

  /// Show diffs of planned changes (dry-run mode)
  #[arg(long)]
  pub show_diff: bool,

  /// Save diffs of planned changes to a file (dry-run mode)
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Align exclusion prefix rules to path-segment boundaries
  /// ("foo" no longer matches "foobar/")
  #[arg(long)]
  pub segment_boundaries: bool,

  /// Abort on the first per-file error instead of skipping the file
  #[arg(long)]
  pub fail_fast: bool,

  /// Generate a JSON report of the run and save it to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Path to config file (default: .rehead.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl UpdateArgs {
  fn error_policy(&self, config: Option<&Config>) -> ErrorPolicy {
    if self.fail_fast {
      return ErrorPolicy::Fail;
    }
    config.and_then(|c| c.on_error).unwrap_or_default()
  }

  fn match_mode(&self, config: Option<&Config>) -> MatchMode {
    let segment = self.segment_boundaries || config.and_then(|c| c.segment_boundaries).unwrap_or(false);
    if segment { MatchMode::Segment } else { MatchMode::Prefix }
  }
}

/// Run the header update with the given arguments
pub fn run_update(args: UpdateArgs) -> Result<()> {
  // Initialize tracing subscriber for diagnostic logging
  init_tracing(args.quiet, args.verbose);

  // Set output mode for the info_log!/verbose_log! macros
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let root = std::env::current_dir().with_context(|| "Failed to get current directory")?;

  // Load configuration file if present
  let config = load_config(args.config.as_deref(), &root, args.no_config)?;
  if config.is_some() {
    debug!("Using configuration file for defaults");
  }

  let info = CopyrightInfo::resolve(
    args.year.clone(),
    args.project.clone(),
    args.holder.clone(),
    config.as_ref(),
  );
  debug!("Copyright data: year={} project={}", info.year, info.project);

  // Load and render the template; a broken template is fatal before any
  // file is touched
  let template_path = args
    .template
    .clone()
    .or_else(|| config.as_ref().and_then(|c| c.template.clone()))
    .unwrap_or_else(|| root.join(DEFAULT_TEMPLATE_FILENAME));
  let template = HeaderTemplate::load(&template_path)
    .with_context(|| format!("Failed to load header template from {}", template_path.display()))?;

  let comment_prefix = args
    .comment_prefix
    .clone()
    .or_else(|| config.as_ref().and_then(|c| c.comment_prefix.clone()))
    .unwrap_or_else(|| DEFAULT_COMMENT_PREFIX.to_string());
  let default_header = apply_comment_prefix(&template.render(&info), &comment_prefix);

  // Load the exclusion list. An explicitly specified file must exist; the
  // default sibling file is optional.
  let match_mode = args.match_mode(config.as_ref());
  let explicit_excludes = args
    .exclude_file
    .clone()
    .or_else(|| config.as_ref().and_then(|c| c.exclude_file.clone()));
  let excludes = match explicit_excludes {
    Some(path) => ExclusionList::load(&path, match_mode)?,
    None => {
      let default_path = root.join(DEFAULT_EXCLUDE_FILENAME);
      if default_path.is_file() {
        ExclusionList::load(&default_path, match_mode)?
      } else {
        ExclusionList::default()
      }
    }
  };
  verbose_log!("Loaded {} exclusion rules", excludes.len());

  let extensions = if !args.ext.is_empty() {
    args.ext.clone()
  } else {
    config
      .as_ref()
      .and_then(|c| c.extensions.clone())
      .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect())
  };

  let error_policy = args.error_policy(config.as_ref());

  let planner = UpdatePlanner::new(&info, default_header);
  let runner = Runner::new(planner, excludes, extensions, root.clone(), args.force, error_policy);

  let files = runner.resolve_files(&args.files)?;
  print_start_message(files.len(), args.dry_run);

  if files.is_empty() {
    print_blank_line();
    print_all_files_ok();
    return Ok(());
  }

  if args.dry_run {
    print_resolved_files(&files);

    // The preview pass only runs when diff output was requested; it reads
    // and plans but never writes.
    let diff = DiffManager::new(args.show_diff, args.save_diff.clone());
    if diff.is_active() {
      let start_time = Instant::now();
      let reports = runner.preview(&files, &diff)?;
      write_report_if_requested(&args, &reports, start_time.elapsed())?;
    }
    return Ok(());
  }

  let start_time = Instant::now();
  let reports = runner.run(&files)?;
  let elapsed = start_time.elapsed();

  let summary = RunSummary::from_reports(&reports, elapsed);

  let inserted: Vec<&FileReport> = reports
    .iter()
    .filter(|r| r.decision == Some(crate::planner::Decision::HeaderInserted))
    .collect();
  let updated: Vec<&FileReport> = reports
    .iter()
    .filter(|r| r.decision == Some(crate::planner::Decision::YearsUpdated))
    .collect();
  let failed: Vec<&FileReport> = reports.iter().filter(|r| r.error.is_some()).collect();

  print_blank_line();
  if inserted.is_empty() && updated.is_empty() && failed.is_empty() && !args.force {
    print_all_files_ok();
  } else {
    print_inserted_files(&inserted, Some(&root));
    if !inserted.is_empty() && !updated.is_empty() {
      print_blank_line();
    }
    print_updated_files(&updated, Some(&root));
    print_failed_files(&failed, Some(&root));
  }

  print_blank_line();
  print_summary(&summary);

  write_report_if_requested(&args, &reports, elapsed)?;

  if !failed.is_empty() {
    process::exit(1);
  }

  Ok(())
}

fn write_report_if_requested(args: &UpdateArgs, reports: &[FileReport], elapsed: std::time::Duration) -> Result<()> {
  if let Some(ref output_path) = args.report_json {
    let summary = RunSummary::from_reports(reports, elapsed);
    write_json_report(output_path, reports, &summary)?;
    info_log!("Generated JSON report at {}", output_path.display());
  }
  Ok(())
}
