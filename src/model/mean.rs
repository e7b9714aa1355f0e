//! Mean-predicting baseline model

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{CoursecastError, Result};
use crate::model::Regressor;

/// Predicts the training-target mean for every input row.
///
/// Any model worth keeping has to beat this one under the same splits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeanRegressor {
    mean: Option<f64>,
}

impl MeanRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fitted mean, if any.
    pub fn mean(&self) -> Option<f64> {
        self.mean
    }
}

impl Regressor for MeanRegressor {
    fn fit(&mut self, _x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        let mean = y.mean().ok_or_else(|| {
            CoursecastError::ValidationError("cannot fit on empty targets".to_string())
        })?;
        self.mean = Some(mean);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let mean = self.mean.ok_or(CoursecastError::ModelNotFitted)?;
        Ok(Array1::from_elem(x.nrows(), mean))
    }
}
