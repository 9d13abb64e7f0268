//! # rehead
//!
//! A tool that keeps project copyright headers present and their year
//! ranges current.

mod cli;
mod config;
mod detect;
mod diff;
mod exclude;
mod file_io;
mod logging;
mod output;
mod planner;
mod report;
mod runner;
mod template;
mod years;

use anyhow::Result;

use crate::cli::{Cli, run_update};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_update(cli.update_args)
}
