//! Structural analysis: ordering, validation and path algebra.
pub mod paths;
pub mod topology;
pub mod validation;

pub use validation::{ValidationError, ValidationErrorType};
