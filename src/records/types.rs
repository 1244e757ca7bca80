use std::fmt;

/// Placeholder written for fields the timetable does not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// Institution-assigned course identifier, e.g. `CSI2110`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseCode(String);

impl CourseCode {
    /// Creates a course code from raw input, trimming surrounding whitespace
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the composite key correlating sections and activities
    ///
    /// The key is the course code followed directly by the section
    /// identifier, or the bare course code when the page omits it.
    pub fn composite_key(&self, section_id: Option<&str>) -> String {
        match section_id {
            Some(id) => format!("{}{}", self.0, id),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// A course with at least one scheduled section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    pub code: CourseCode,

    /// Stripped course title, unquoted
    pub title: String,
}

/// One schedule table within a semester block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRecord {
    /// Course code plus section identifier, or the course code alone
    pub composite_key: String,
    pub code: CourseCode,
    pub semester_id: String,
    pub one_discussion_group: bool,
    pub one_tutorial: bool,
    pub one_lab: bool,
}

/// A single scheduled meeting of a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    /// Lecture, Laboratory, Tutorial, ...
    pub activity_type: String,
    pub activity_number: String,
    pub section_key: String,
    pub semester_id: String,
    pub day: String,
    /// HH:MM
    pub start_time: String,
    /// HH:MM
    pub end_time: String,
    pub place: String,
    pub professor: String,
}

/// Everything extracted from one course page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedCourse {
    pub course: CourseRecord,
    pub sections: Vec<SectionRecord>,
    pub activities: Vec<ActivityRecord>,
}

/// Why a course was left out of the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The page heading did not carry the expected title pattern
    NoTitle,

    /// No section on the page had any activity
    NoSections,

    /// Every attempt ended with an HTTP status error
    RetriesExhaustedHttpError,

    /// Every attempt ended with a connection-level error
    RetriesExhaustedUrlError,

    /// The page structure broke extraction in an unanticipated way
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoTitle => f.write_str("no title"),
            SkipReason::NoSections => f.write_str("no sections"),
            SkipReason::RetriesExhaustedHttpError => f.write_str("ran out of retries, HTTPError"),
            SkipReason::RetriesExhaustedUrlError => f.write_str("ran out of retries, URLError"),
            SkipReason::Malformed(detail) => write!(f, "malformed page, {}", detail),
        }
    }
}

/// A course routed to the skip list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCourse {
    pub code: CourseCode,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedCourse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.code, self.reason)
    }
}
