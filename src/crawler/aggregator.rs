//! Aggregation of scraped courses into output lines

use crate::records::ScrapedCourse;

/// The three output collections of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub courses: Vec<String>,
    pub sections: Vec<String>,
    pub activities: Vec<String>,
}

impl Aggregate {
    /// Sorts each collection for deterministic output
    pub fn sort(&mut self) {
        self.courses.sort();
        self.sections.sort();
        self.activities.sort();
    }
}

/// Renders every course, section and activity into its CSV line
///
/// Courses keep the order they appear in `results`, and each course's
/// sections and activities keep the order they were extracted in.
/// The input is only read, so aggregating the same snapshot twice yields
/// identical output.
pub fn aggregate(results: &[ScrapedCourse]) -> Aggregate {
    let mut aggregate = Aggregate::default();

    for scraped in results {
        aggregate.courses.push(scraped.course.to_csv_line());
        aggregate
            .sections
            .extend(scraped.sections.iter().map(|s| s.to_csv_line()));
        aggregate
            .activities
            .extend(scraped.activities.iter().map(|a| a.to_csv_line()));
    }

    aggregate
}
