//! Output module for writing scrape results
//!
//! This module handles:
//! - Writing the course, section and activity CSV files
//! - Writing the skip list for rerunning with `--skipped`
//! - Printing the run summary

pub mod stats;
mod writer;

pub use stats::{print_summary, RunSummary};
pub use writer::{write_lines, write_skip_list};
