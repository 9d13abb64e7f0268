//! # rehead
//!
//! A tool that keeps project copyright headers present and their year
//! ranges current by scanning a source tree.
//!
//! `rehead` modifies source files in place. Files that already carry a
//! recognizable header for the project get their year expression merged with
//! the run's year; files without one get a freshly rendered, comment-prefixed
//! header prepended. Repeated runs converge: once every file carries the
//! merged year, a further run changes nothing.
//!
//! ## Features
//!
//! * Recursively scan a directory for candidate files by extension
//! * Exclusion list with directory-prefix and exact-filename rules
//! * Template-driven headers with year/project/holder placeholders
//! * Year-range normalization inside existing headers (`2021` + `2024`
//!   becomes `2021-2024`)
//! * Dry-run mode that reports the resolved file set without writing
//! * Atomic write-back via a temporary file and rename
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use rehead::config::{CopyrightInfo, ErrorPolicy};
//! use rehead::exclude::ExclusionList;
//! use rehead::planner::UpdatePlanner;
//! use rehead::runner::Runner;
//! use rehead::template::{HeaderTemplate, apply_comment_prefix};
//!
//! fn main() -> anyhow::Result<()> {
//!     let info = CopyrightInfo::resolve(Some("2025".to_string()), None, None, None);
//!
//!     let template = HeaderTemplate::load(std::path::Path::new("copyrightheader.txt"))?;
//!     let header = apply_comment_prefix(&template.render(&info), "%");
//!
//!     let planner = UpdatePlanner::new(&info, header);
//!     let runner = Runner::new(
//!         planner,
//!         ExclusionList::default(),
//!         vec!["m".to_string()],
//!         PathBuf::from("."),
//!         false, // force
//!         ErrorPolicy::Skip,
//!     );
//!
//!     let files = runner.resolve_files(&[])?;
//!     let reports = runner.run(&files)?;
//!
//!     for report in &reports {
//!         println!("{}: {:?}", report.path.display(), report.decision);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`planner`] - The update policy core: detect, merge, or insert
//! * [`runner`] - File resolution and sequential application
//! * [`template`] - Header template rendering and comment prefixing
//! * [`years`] - Year-range merging
//!
//! [`planner`]: crate::planner
//! [`runner`]: crate::runner
//! [`template`]: crate::template
//! [`years`]: crate::years

// Re-export modules for public API
pub mod config;
pub mod detect;
pub mod diff;
pub mod exclude;
pub mod file_io;
pub mod logging;
pub mod planner;
pub mod report;
pub mod runner;
pub mod template;
pub mod years;
