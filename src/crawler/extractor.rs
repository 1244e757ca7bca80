//! Course page extractor
//!
//! Turns one timetable page into a [`ScrapedCourse`]: the course title from
//! the page heading, one section per schedule table that lists at least one
//! activity, and one activity per `td.Activity` cell.
//!
//! # Page Layout
//!
//! ```text
//! div#main-content
//! ├── h1                         "CSI2110 - Data Structures and Algorithms"
//! └── div#schedule
//!     └── div.schedule[id=2149]  one per semester
//!         └── table              one per section
//!             ├── td.Section     "CSI2110 A"
//!             ├── tr > td.Activity, td (day/time), td (place), td (professor)
//!             └── tr.footer > td "Only one laboratory ..."
//! ```

use crate::crawler::dom::DomNode;
use crate::records::{
    ActivityRecord, CourseCode, CourseRecord, ScrapedCourse, SectionRecord, NOT_AVAILABLE,
};
use regex::Regex;
use scraper::Html;
use thiserror::Error;

/// Failure to extract a course from its page
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The heading did not carry `<code> - <title>`
    #[error("no title")]
    NoTitle,

    /// No schedule table produced an activity
    #[error("no sections")]
    NoSections,

    /// The page deviated from the expected structure
    #[error("{0}")]
    Malformed(String),

    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Footer markers limiting how many activities of a kind a student attends
const ONE_DISCUSSION_GROUP: &str = "Only one discussion group";
const ONE_LABORATORY: &str = "Only one laboratory";
const ONE_TUTORIAL: &str = "Only one tutorial";

/// Text patterns used for one course
struct Patterns {
    title: Regex,
    section: Regex,
    letters: Regex,
    digits: Regex,
    start_time: Regex,
    end_time: Regex,
}

impl Patterns {
    fn for_course(code: &CourseCode) -> Result<Self, ExtractError> {
        let escaped = regex::escape(code.as_str());
        Ok(Self {
            title: Regex::new(&format!("{} - (.*)", escaped))?,
            section: Regex::new(&format!("{} (.*)", escaped))?,
            letters: Regex::new(r"([a-zA-Z ]+)")?,
            digits: Regex::new(r"(\d+)")?,
            start_time: Regex::new(r"(\d{2}:\d{2}) -")?,
            end_time: Regex::new(r"- (\d{2}:\d{2})")?,
        })
    }
}

/// First capture group of `pattern` in `text`, trimmed
fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Parses a raw course page and extracts its records
///
/// # Arguments
///
/// * `code` - The course code the page was fetched for
/// * `body` - Raw response body; invalid UTF-8 is replaced, not rejected
///
/// # Returns
///
/// * `Ok(ScrapedCourse)` - The course with at least one section
/// * `Err(ExtractError::NoTitle)` - Heading missing or not matching the code
/// * `Err(ExtractError::NoSections)` - No table listed any activity
/// * `Err(ExtractError::Malformed)` - Unexpected structure inside a section
///
/// # Example
///
/// ```
/// use timetable_scraper::crawler::{extract, ExtractError};
/// use timetable_scraper::CourseCode;
///
/// let page = b"<div id=\"main-content\"><h1>CSI2110 - Data Structures</h1></div>";
/// let result = extract(&CourseCode::from("CSI2110"), page);
/// assert!(matches!(result, Err(ExtractError::NoSections)));
/// ```
pub fn extract(code: &CourseCode, body: &[u8]) -> Result<ScrapedCourse, ExtractError> {
    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);
    extract_course(code, document.root_element())
}

/// Extracts a course from any parsed document tree
pub fn extract_course<N: DomNode>(
    code: &CourseCode,
    root: N,
) -> Result<ScrapedCourse, ExtractError> {
    let patterns = Patterns::for_course(code)?;

    let content = root
        .find_by_id("div", "main-content")
        .ok_or(ExtractError::NoTitle)?;
    let heading = content.find("h1").ok_or(ExtractError::NoTitle)?;
    let title =
        capture(&patterns.title, &heading.text_content()).ok_or(ExtractError::NoTitle)?;

    let schedule = content
        .find_by_id("div", "schedule")
        .ok_or(ExtractError::NoSections)?;

    let mut sections = Vec::new();
    let mut activities = Vec::new();

    for semester in schedule.find_all_by_class("div", "schedule") {
        let semester_id = semester
            .attribute("id")
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(NOT_AVAILABLE)
            .to_string();

        for table in semester.find_all("table") {
            let section_id = extract_section_id(&patterns, table)?;
            let key = code.composite_key(section_id.as_deref());

            let mut section_activities = Vec::new();
            for cell in table.find_all_by_class("td", "Activity") {
                section_activities.push(extract_activity(
                    &patterns,
                    cell,
                    &key,
                    &semester_id,
                )?);
            }

            if section_activities.is_empty() {
                continue;
            }

            let footer = footer_text(table);
            sections.push(SectionRecord {
                composite_key: key,
                code: code.clone(),
                semester_id: semester_id.clone(),
                one_discussion_group: footer.contains(ONE_DISCUSSION_GROUP),
                one_tutorial: footer.contains(ONE_TUTORIAL),
                one_lab: footer.contains(ONE_LABORATORY),
            });
            activities.append(&mut section_activities);
        }
    }

    if sections.is_empty() {
        return Err(ExtractError::NoSections);
    }

    Ok(ScrapedCourse {
        course: CourseRecord {
            code: code.clone(),
            title,
        },
        sections,
        activities,
    })
}

/// Section identifier following the course code in the section cell
///
/// A cell that does not start with the code yields `None`, and every such
/// table of the course shares the bare course code as its key.
fn extract_section_id<N: DomNode>(
    patterns: &Patterns,
    table: N,
) -> Result<Option<String>, ExtractError> {
    let cell = table.find_by_class("td", "Section").ok_or_else(|| {
        ExtractError::Malformed("section table without a Section cell".to_string())
    })?;

    Ok(cell
        .leading_text()
        .and_then(|text| capture(&patterns.section, &text))
        .filter(|id| !id.is_empty()))
}

fn footer_text<N: DomNode>(table: N) -> String {
    table
        .find_by_class("tr", "footer")
        .and_then(|footer| footer.find("td"))
        .map(|cell| cell.text_content())
        .unwrap_or_default()
}

/// Place and professor cells say "Not available" when unassigned
fn available_or_na(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() || text == "&nbsp;" || text.contains("available") {
        NOT_AVAILABLE.to_string()
    } else {
        text.to_string()
    }
}

fn extract_activity<N: DomNode>(
    patterns: &Patterns,
    cell: N,
    section_key: &str,
    semester_id: &str,
) -> Result<ActivityRecord, ExtractError> {
    let text = cell.text_content();
    let malformed =
        |what: &str| ExtractError::Malformed(format!("{} in activity '{}'", what, text.trim()));

    let activity_type =
        capture(&patterns.letters, &text).ok_or_else(|| malformed("no activity type"))?;
    let activity_number =
        capture(&patterns.digits, &text).ok_or_else(|| malformed("no activity number"))?;

    let day_cell = cell.next_element().ok_or_else(|| malformed("no day cell"))?;
    let place_cell = day_cell.next_element().ok_or_else(|| malformed("no place cell"))?;
    let professor_cell = place_cell
        .next_element()
        .ok_or_else(|| malformed("no professor cell"))?;

    let schedule = day_cell.text_content();
    let day = capture(&patterns.letters, &schedule)
        .filter(|day| !day.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let start_time =
        capture(&patterns.start_time, &schedule).ok_or_else(|| malformed("no start time"))?;
    let end_time =
        capture(&patterns.end_time, &schedule).ok_or_else(|| malformed("no end time"))?;

    Ok(ActivityRecord {
        activity_type,
        activity_number,
        section_key: section_key.to_string(),
        semester_id: semester_id.to_string(),
        day,
        start_time,
        end_time,
        place: available_or_na(&place_cell.text_content()),
        professor: available_or_na(&professor_cell.text_content()),
    })
}
