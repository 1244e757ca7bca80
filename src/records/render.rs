//! Comma-separated rendering of schedule records
//!
//! Escaping is minimal: a course title containing a comma is wrapped in
//! double quotes, nothing else is quoted.

use super::types::{ActivityRecord, CourseRecord, SectionRecord};

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

impl CourseRecord {
    /// Renders `code,title`
    pub fn to_csv_line(&self) -> String {
        if self.title.contains(',') {
            format!("{},\"{}\"", self.code, self.title)
        } else {
            format!("{},{}", self.code, self.title)
        }
    }
}

impl SectionRecord {
    /// Renders `compositeKey,code,semesterId,dgd,tutorial,lab`
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.composite_key,
            self.code,
            self.semester_id,
            flag(self.one_discussion_group),
            flag(self.one_tutorial),
            flag(self.one_lab)
        )
    }
}

impl ActivityRecord {
    /// Renders `type,number,sectionKey,semesterId,day,start,end,place,professor`
    pub fn to_csv_line(&self) -> String {
        [
            self.activity_type.as_str(),
            self.activity_number.as_str(),
            self.section_key.as_str(),
            self.semester_id.as_str(),
            self.day.as_str(),
            self.start_time.as_str(),
            self.end_time.as_str(),
            self.place.as_str(),
            self.professor.as_str(),
        ]
        .join(",")
    }
}
