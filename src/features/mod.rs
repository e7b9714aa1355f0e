//! Feature engineering: encoders, plans, and matrix assembly
//!
//! The fit-once / apply-many pipeline for turning retained course records
//! into a numeric feature matrix:
//! - [`CategoryTable`] — value -> dense code lookups per categorical feature
//! - [`ClockTime`] — wall-clock parsing to a canonical numeric form
//! - [`FeatureSpec`] / [`FeaturePlan`] — the ordered feature declaration
//! - [`FeatureSet`] — fitted tables plus row encoding and matrix assembly

pub mod category;
pub mod encode;
pub mod plan;
pub mod text;
pub mod time;

pub use category::CategoryTable;
pub use encode::FeatureSet;
pub use plan::{FeatureContext, FeaturePlan, FeatureSpec};
pub use text::{keyword_present, summary_length, SentimentScorer};
pub use time::ClockTime;
