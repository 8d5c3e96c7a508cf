//! Defines the immutable causal graph.
pub mod dag;

pub use dag::CausalGraph;
