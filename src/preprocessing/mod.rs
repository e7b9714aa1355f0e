//! Feature-matrix preprocessing

mod scaler;

pub use scaler::{standardize, StandardScaler};
