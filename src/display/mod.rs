//! Text output for graphs and regression results.
pub mod report;
