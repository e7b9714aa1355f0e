//! Course catalog records and per-field presence checks

use serde::{Deserialize, Serialize};

use crate::features::time::ClockTime;

/// Placeholder the source catalog uses for fields it has no value for.
pub const NOT_AVAILABLE: &str = "n/a";

/// Department code the lab-section filter exempts (music "labs" are
/// ordinary ensembles, not lab sections).
const MUSIC_DEPARTMENT: &str = "MUSC";

/// One course section as published in a term catalog.
///
/// Fields carry the catalog's raw values: text fields may hold the
/// `"n/a"` placeholder, clock times are strings such as `"8:30am"`, and
/// counts are absent when the catalog had none. Use [`CourseRecord::has_field`]
/// to test whether a field is usable before treating it as data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Term identifier, e.g. `"15WI"`.
    #[serde(default)]
    pub term: String,
    /// Section title.
    pub title: String,
    /// Department code, e.g. `"CS"` or `"MUSC"`.
    pub department: String,
    /// Instructor field as printed, e.g. `"Jane Q. Smith"`.
    #[serde(default)]
    pub instructor: String,
    /// Wall-clock start time, e.g. `"8:30am"`.
    #[serde(default)]
    pub start_time: String,
    /// Wall-clock end time, e.g. `"9:40am"`.
    #[serde(default)]
    pub end_time: String,
    /// Distribution requirements the section satisfies. `None` when the
    /// catalog listed the field as unavailable; `Some(vec![])` when the
    /// section genuinely satisfies none.
    #[serde(default)]
    pub requirements_met: Option<Vec<String>>,
    /// Credit string as printed, e.g. `"6.00"`.
    #[serde(default)]
    pub credits: String,
    /// Students registered at the census snapshot.
    #[serde(default)]
    pub registered: Option<u32>,
    /// Seats offered.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Free-text course description.
    #[serde(default)]
    pub summary: String,
}

/// Source fields an engineered feature can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Department,
    Title,
    Instructor,
    /// Instructor must additionally match an entry in the rating roster.
    InstructorRating,
    StartTime,
    EndTime,
    Requirements,
    Summary,
    Registered,
    Capacity,
}

impl Field {
    /// Human-readable field name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Department => "department",
            Field::Title => "title",
            Field::Instructor => "instructor",
            Field::InstructorRating => "instructor rating",
            Field::StartTime => "start time",
            Field::EndTime => "end time",
            Field::Requirements => "requirements met",
            Field::Summary => "summary",
            Field::Registered => "registered",
            Field::Capacity => "capacity",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn text_present(value: &str) -> bool {
    !value.is_empty() && value != NOT_AVAILABLE
}

impl CourseRecord {
    /// Whether `field` is present and non-sentinel on this record.
    ///
    /// Clock-time fields additionally have to parse; a start time of
    /// `"8:61am"` is as unusable as `"n/a"`. [`Field::InstructorRating`]
    /// presence depends on the rating roster and is answered by the
    /// ingestion layer, so here it only requires the instructor text.
    pub fn has_field(&self, field: Field) -> bool {
        match field {
            Field::Department => text_present(&self.department),
            Field::Title => text_present(&self.title),
            Field::Instructor | Field::InstructorRating => text_present(&self.instructor),
            Field::StartTime => {
                text_present(&self.start_time) && ClockTime::parse(&self.start_time).is_ok()
            }
            Field::EndTime => {
                text_present(&self.end_time) && ClockTime::parse(&self.end_time).is_ok()
            }
            Field::Requirements => self.requirements_met.is_some(),
            Field::Summary => text_present(&self.summary),
            Field::Registered => self.registered.is_some(),
            Field::Capacity => self.capacity.is_some(),
        }
    }

    /// Enrollment fill ratio: registered over capacity.
    ///
    /// `None` when either count is absent or capacity is zero. Can exceed
    /// 1.0 for overenrolled sections.
    pub fn fill_ratio(&self) -> Option<f64> {
        match (self.registered, self.capacity) {
            (Some(registered), Some(capacity)) if capacity > 0 => {
                Some(f64::from(registered) / f64::from(capacity))
            }
            _ => None,
        }
    }

    /// Lab-section heuristic: `"Lab"` in the title marks a lab section,
    /// except in the music department (ensembles titled "Lab Band") and
    /// for six-credit sections (full courses, not satellite labs).
    pub fn is_lab_section(&self) -> bool {
        self.title.contains("Lab")
            && self.department != MUSIC_DEPARTMENT
            && !self.credits.starts_with('6')
    }
}
