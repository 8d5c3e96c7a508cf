//! Columnar storage for structural models.
pub mod registry;
pub mod types;

pub use registry::Registry;
pub use types::{EdgeSpec, NodeId, NodeMetadata, NoiseSpec};
