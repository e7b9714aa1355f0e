//! Instructor rating roster and approximate-name join

use serde::{Deserialize, Serialize};

/// One instructor's aggregate rating from an external source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorRating {
    /// Name as the rating source prints it, e.g. `"Jane Smith"`.
    pub name: String,
    /// Average rating.
    pub rating: f64,
    /// Number of ratings behind the average.
    pub count: u32,
}

/// Read-only roster of instructor ratings, joined to course records by
/// approximate name matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingRoster {
    entries: Vec<InstructorRating>,
}

impl RatingRoster {
    pub fn new(entries: Vec<InstructorRating>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[InstructorRating] {
        &self.entries
    }

    /// Find the rating for a course's instructor field.
    ///
    /// A roster entry matches when every whitespace-separated token of its
    /// name (first and last at minimum) appears as a substring of the
    /// instructor field, so `"Jane Smith"` matches `"Jane Q. Smith"`. The
    /// first matching entry in roster order wins.
    pub fn rating_for(&self, instructor: &str) -> Option<&InstructorRating> {
        self.entries.iter().find(|entry| {
            let mut tokens = entry.name.split_whitespace().peekable();
            tokens.peek().is_some() && tokens.all(|token| instructor.contains(token))
        })
    }
}
