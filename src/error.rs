//! Error types for the coursecast library

use thiserror::Error;

/// Result type alias for coursecast operations
pub type Result<T> = std::result::Result<T, CoursecastError>;

/// Main error type for the coursecast library
#[derive(Error, Debug)]
pub enum CoursecastError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Unknown category for feature {feature}: {value}")]
    UnknownCategory { feature: String, value: String },

    #[error("Record is missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Computation error: {0}")]
    ComputationError(String),
}

impl From<ndarray::ShapeError> for CoursecastError {
    fn from(err: ndarray::ShapeError) -> Self {
        CoursecastError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}
