//! # Planner Module
//!
//! This module contains the policy core that decides, for one file's
//! content, whether anything changes and what: an existing header gets its
//! year expression merged, a missing header gets the rendered default header
//! prepended, and identical output means the file is left alone.
//!
//! The planner is pure over content; reading and writing files is the
//! runner's job, which keeps every decision directly testable on strings.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::config::CopyrightInfo;
use crate::detect::{HeaderDetector, WindowedDetector};
use crate::years::YearMerger;

/// The outcome decided for one file. Every processed file gets exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decision {
  /// Content already converged; nothing to write
  Unchanged,
  /// A header was found and its year expression was rewritten
  YearsUpdated,
  /// No header was found; the default header was prepended
  HeaderInserted,
}

impl std::fmt::Display for Decision {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Decision::Unchanged => write!(f, "unchanged"),
      Decision::YearsUpdated => write!(f, "years-updated"),
      Decision::HeaderInserted => write!(f, "header-inserted"),
    }
  }
}

/// A planned update for one file: the resulting content and the decision.
///
/// Borrows the input content when the decision is [`Decision::Unchanged`].
pub struct Plan<'a> {
  pub content: Cow<'a, str>,
  pub decision: Decision,
}

/// Decides how a file's content changes for a given copyright setup.
///
/// Holds the pieces computed once per run: the detector, the year merger,
/// the project name to detect by, and the already comment-prefixed default
/// header used for insertion.
pub struct UpdatePlanner {
  detector: Box<dyn HeaderDetector>,
  merger: YearMerger,
  project: String,
  default_header: String,
}

impl UpdatePlanner {
  /// Creates a planner with the default windowed detector.
  ///
  /// `default_header` is the rendered, comment-prefixed header text that
  /// gets prepended to headerless files.
  pub fn new(info: &CopyrightInfo, default_header: String) -> Self {
    Self::with_detector(info, default_header, Box::new(WindowedDetector::new()))
  }

  /// Creates a planner with a custom header detector.
  pub fn with_detector(info: &CopyrightInfo, default_header: String, detector: Box<dyn HeaderDetector>) -> Self {
    Self {
      detector,
      merger: YearMerger::new(info.year.clone()),
      project: info.project.clone(),
      default_header,
    }
  }

  /// Plans the update for one file's content.
  ///
  /// - header detected and year merge changes the text: [`Decision::YearsUpdated`]
  /// - header detected and the text is already canonical: [`Decision::Unchanged`]
  /// - no header detected: the default header plus a newline is prepended to
  ///   the original content, byte for byte: [`Decision::HeaderInserted`]
  ///
  /// Applying the planner twice converges: the second plan of any output is
  /// `Unchanged`.
  pub fn plan<'a>(&self, content: &'a str) -> Plan<'a> {
    if self.detector.has_header(content, &self.project) {
      return match self.merger.merge(content) {
        Cow::Owned(merged) if merged != content => Plan {
          content: Cow::Owned(merged),
          decision: Decision::YearsUpdated,
        },
        _ => Plan {
          content: Cow::Borrowed(content),
          decision: Decision::Unchanged,
        },
      };
    }

    Plan {
      content: Cow::Owned(format!("{}\n{}", self.default_header, content)),
      decision: Decision::HeaderInserted,
    }
  }
}
