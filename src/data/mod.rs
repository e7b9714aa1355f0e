//! Course records, targets, and external rating data

pub mod dataset;
pub mod ratings;
pub mod record;

pub use dataset::{Dataset, DatasetSummary};
pub use ratings::{InstructorRating, RatingRoster};
pub use record::{CourseRecord, Field, NOT_AVAILABLE};
