//! Regression models for fill-ratio prediction
//!
//! Hand-rolled regressors over `ndarray`:
//! - [`MeanRegressor`] — the comparison baseline
//! - [`LinearRegression`] / [`RidgeRegression`] — normal-equation solvers
//! - [`KnnRegressor`] — nearest-neighbor averaging
//!
//! The cross-validation harness only sees the [`Regressor`] trait; anything
//! with a fit/predict pair over real-valued targets plugs in.

mod knn;
mod linear;
mod mean;

pub use knn::{DistanceMetric, KnnRegressor, WeightScheme};
pub use linear::{LinearRegression, RidgeRegression};
pub use mean::MeanRegressor;

use ndarray::{Array1, Array2};

use crate::error::Result;

/// The capability set the cross-validation harness requires.
pub trait Regressor {
    /// Fit on training rows and real-valued targets.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    /// Predict one value per row of `x`. Errs with `ModelNotFitted` before
    /// a successful `fit`.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;
}
