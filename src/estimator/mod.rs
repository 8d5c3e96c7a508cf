//! Ordinary least squares and the causal estimation strategies built on it.
pub mod ols;
pub mod problem;
pub mod qr;
pub mod strategies;
pub mod study;

pub use ols::{fit, Coefficient, Fit};
pub use problem::{DesignMatrix, FitOptions, INTERCEPT};
pub use strategies::{adjusted, naive, two_stage, TwoStageFit};
pub use study::{replicate, BiasSummary};
