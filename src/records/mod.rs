//! Schedule records produced by the extractor
//!
//! This module defines the immutable records emitted for each scraped course
//! and their rendering into comma-separated output lines.

mod render;
mod types;

pub use types::{
    ActivityRecord, CourseCode, CourseRecord, ScrapedCourse, SectionRecord, SkipReason,
    SkippedCourse, NOT_AVAILABLE,
};
