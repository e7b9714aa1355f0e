//! Retained course records and their parallel prediction targets

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::data::record::CourseRecord;
use crate::error::{CoursecastError, Result};

/// The retained record set plus one fill-ratio target per record.
///
/// Targets are derived once at ingestion and immutable afterward; record
/// order and target order always agree, and the feature matrix built from
/// this set keeps the same row order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<CourseRecord>,
    targets: Vec<f64>,
}

/// Descriptive totals over a dataset, the "initial analysis" block as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Retained course count.
    pub courses: usize,
    /// Courses with fill ratio >= 1.
    pub filled_to_capacity: usize,
    /// Mean fill ratio, counting overenrolled sections at face value.
    pub mean_fill: f64,
}

impl Dataset {
    /// Pair records with their targets; lengths must agree.
    pub fn new(records: Vec<CourseRecord>, targets: Vec<f64>) -> Result<Self> {
        if records.len() != targets.len() {
            return Err(CoursecastError::ShapeError {
                expected: format!("{} targets", records.len()),
                actual: format!("{} targets", targets.len()),
            });
        }
        Ok(Self { records, targets })
    }

    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Targets as an `ndarray` vector for model fitting.
    pub fn target_array(&self) -> Array1<f64> {
        Array1::from_vec(self.targets.clone())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> DatasetSummary {
        let courses = self.targets.len();
        let filled_to_capacity = self.targets.iter().filter(|&&t| t >= 1.0).count();
        let mean_fill = if courses == 0 {
            0.0
        } else {
            self.targets.iter().sum::<f64>() / courses as f64
        };
        DatasetSummary {
            courses,
            filled_to_capacity,
            mean_fill,
        }
    }
}
