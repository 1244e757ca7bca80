//! Run summary reporting
//!
//! This module collects the counts of a finished run and prints them
//! together with the skip list for operator follow-up.

use crate::records::SkippedCourse;
use chrono::{DateTime, Utc};

/// Summary of one scraper run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Course codes read from the input file
    pub requested: usize,

    /// Lines written to each output collection
    pub courses: usize,
    pub sections: usize,
    pub activities: usize,

    /// Courses left out of the output, with reasons
    pub skipped: Vec<SkippedCourse>,
}

impl RunSummary {
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!(
        "Done work. Got {} courses, skipped {}",
        summary.courses,
        summary.skipped.len()
    );
    println!();

    if !summary.skipped.is_empty() {
        println!("These courses were skipped: ");
        for skipped in &summary.skipped {
            println!("  {}", skipped);
        }
        println!();
    }

    println!("Courses: {}", summary.courses);
    println!("Sections: {}", summary.sections);
    println!("Activities: {}", summary.activities);
    println!(
        "Processed {} course codes in {}s",
        summary.requested,
        summary.duration_seconds()
    );
}
