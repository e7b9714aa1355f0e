//! Column-wise standardization of feature matrices

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{CoursecastError, Result};

/// Per-column z-score scaler: `(value - mean) / std`.
///
/// Uses the population standard deviation. A zero-variance column gets a
/// divisor of 1, so a constant column standardizes to all zeros instead of
/// producing non-finite values — a policy decision, tested explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Option<Array1<f64>>,
    scales: Option<Array1<f64>>,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            means: None,
            scales: None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.means.is_some()
    }

    /// Record each column's mean and population standard deviation.
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<&mut Self> {
        if x.nrows() == 0 {
            return Err(CoursecastError::ValidationError(
                "cannot fit scaler on an empty matrix".to_string(),
            ));
        }

        let means = x
            .mean_axis(Axis(0))
            .ok_or_else(|| CoursecastError::ComputationError("column mean failed".to_string()))?;
        let stds = x.std_axis(Axis(0), 0.0);
        let scales = stds.mapv(|s| if s == 0.0 { 1.0 } else { s });

        self.means = Some(means);
        self.scales = Some(scales);
        Ok(self)
    }

    /// Standardize a copy of `x` with the fitted parameters.
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let mut out = x.clone();
        self.transform_inplace(&mut out)?;
        Ok(out)
    }

    /// Standardize `x` in place with the fitted parameters.
    pub fn transform_inplace(&self, x: &mut Array2<f64>) -> Result<()> {
        let (means, scales) = match (&self.means, &self.scales) {
            (Some(means), Some(scales)) => (means, scales),
            _ => return Err(CoursecastError::ModelNotFitted),
        };
        if x.ncols() != means.len() {
            return Err(CoursecastError::ShapeError {
                expected: format!("{} columns", means.len()),
                actual: format!("{} columns", x.ncols()),
            });
        }

        for (col, (&mean, &scale)) in x
            .columns_mut()
            .into_iter()
            .zip(means.iter().zip(scales.iter()))
        {
            let mut col = col;
            col.mapv_inplace(|v| (v - mean) / scale);
        }
        Ok(())
    }

    /// Fit and transform in one step.
    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Fitted column means.
    pub fn means(&self) -> Option<&Array1<f64>> {
        self.means.as_ref()
    }

    /// Fitted column scales (population std, zero-variance clamped to 1).
    pub fn scales(&self) -> Option<&Array1<f64>> {
        self.scales.as_ref()
    }
}

/// One-shot in-place standardization of every column of `x`.
pub fn standardize(x: &mut Array2<f64>) -> Result<()> {
    let mut scaler = StandardScaler::new();
    scaler.fit(x)?;
    scaler.transform_inplace(x)
}
