//! The structural equation simulator.
pub mod bytecode;
pub mod engine;
pub mod kernel;
pub mod ledger;

pub use engine::{simulate, simulate_with, simulate_with_rng, Engine};
pub use ledger::SampleTable;
