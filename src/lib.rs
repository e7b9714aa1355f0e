//! coursecast - course-enrollment fill-ratio analysis and prediction
//!
//! An exploratory pipeline over historical course-catalog records: derive
//! an enrollment fill ratio (registered / capacity) per section, compute
//! grouped descriptive statistics, and cross-validate regression models
//! that predict the fill ratio from engineered catalog features.
//!
//! # Modules
//!
//! - [`data`] - course records, targets, instructor-rating roster
//! - [`features`] - categorical encoders, feature plans, matrix assembly
//! - [`preprocessing`] - column-wise standardization
//! - [`model`] - the [`model::Regressor`] trait and bundled regressors
//! - [`validation`] - repeated random-holdout cross-validation
//! - [`stats`] - grouped means over fill-ratio targets
//! - [`pipeline`] - per-run orchestration of the above
//!
//! Data acquisition is out of scope: callers supply `Vec<CourseRecord>`
//! (and optionally rating records and a sentiment scorer) however they
//! load them.
//!
//! # Example
//!
//! ```no_run
//! use coursecast::prelude::*;
//!
//! fn evaluate(records: Vec<CourseRecord>) -> coursecast::Result<CvReport> {
//!     let pipeline = Pipeline::new(FeaturePlan::standard());
//!     let config = CvConfig::new().with_trials(10).with_seed(42);
//!     let run = pipeline.run(records, LinearRegression::new, &config)?;
//!     Ok(run.report)
//! }
//! ```

pub mod data;
pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod preprocessing;
pub mod stats;
pub mod validation;

pub use error::{CoursecastError, Result};

/// Commonly used types in one import.
pub mod prelude {
    pub use crate::data::{
        CourseRecord, Dataset, DatasetSummary, Field, InstructorRating, RatingRoster,
    };
    pub use crate::error::{CoursecastError, Result};
    pub use crate::features::{
        CategoryTable, ClockTime, FeatureContext, FeaturePlan, FeatureSet, FeatureSpec,
        SentimentScorer,
    };
    pub use crate::model::{
        DistanceMetric, KnnRegressor, LinearRegression, MeanRegressor, Regressor,
        RidgeRegression, WeightScheme,
    };
    pub use crate::pipeline::{IngestStats, Pipeline, PipelineRun};
    pub use crate::preprocessing::{standardize, StandardScaler};
    pub use crate::stats::{mean_by_group, mean_by_groups, GroupStat};
    pub use crate::validation::{
        cross_validate, CvConfig, CvReport, ErrorMetric, HoldoutSplit,
    };
}
