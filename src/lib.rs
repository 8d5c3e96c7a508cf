//! Linear structural equation models and the regressions used to read causal
//! effects off them.
//!
//! A [`CausalGraph`] is built once from `(source, target, coefficient)` triples and
//! rejected if it is cyclic. [`simulate`] draws a [`SampleTable`] from it, evaluating
//! each node as the weighted sum of its parents plus independent noise. The
//! [`estimator`] module fits ordinary least squares on that table: naively,
//! with a caller-chosen adjustment set, or in two stages through an instrument.
//!
//! ```no_run
//! use causal_sem_core::{estimator, simulate, CausalGraph, SimulationConfig};
//!
//! let graph = CausalGraph::from_edges([("h", "x", 1.0), ("h", "y", 2.0), ("x", "y", 3.0)])?;
//! let table = simulate(&graph, &SimulationConfig::seeded(1000, 7))?;
//! let naive = estimator::naive(&table, "y", "x")?.coefficient("x")?;
//! let adjusted = estimator::adjusted(&table, "y", "x", &["h"])?.coefficient("x")?;
//! assert!(naive > adjusted);
//! # Ok::<(), causal_sem_core::SemError>(())
//! ```

pub mod analysis;
pub mod compute;
pub mod config;
pub mod display;
pub mod error;
pub mod estimator;
pub mod graph;
pub mod store;

pub use compute::{simulate, simulate_with, SampleTable};
pub use config::{ModelSpec, SimulationConfig};
pub use error::{Result, SemError};
pub use estimator::{Fit, FitOptions, TwoStageFit};
pub use graph::CausalGraph;
pub use store::{EdgeSpec, NodeId, NodeMetadata, NoiseSpec};
