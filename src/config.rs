//! Model descriptions and run settings, loadable from JSON.
use crate::error::{Result, SemError};
use crate::store::{EdgeSpec, NodeMetadata};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A complete description of a linear structural model.
///
/// Nodes that only appear in `edges` get standard-normal noise. Declare a node in
/// `nodes` to give it a different disturbance or to add an isolated variable.
///
/// ```json
/// {
///   "nodes": [{ "name": "x", "noise": { "kind": "gaussian", "scale": 0.5 } }],
///   "edges": [{ "source": "h", "target": "x", "coefficient": 1.0 }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    #[serde(default)]
    pub nodes: Vec<NodeMetadata>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl ModelSpec {
    pub fn from_edges<E: Into<EdgeSpec>>(edges: impl IntoIterator<Item = E>) -> Self {
        Self { nodes: Vec::new(), edges: edges.into_iter().map(Into::into).collect() }
    }

    pub fn with_node(mut self, node: NodeMetadata) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SemError::Config(format!("Invalid model JSON: {}", e)))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SemError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SemError::Config(e.to_string()))
    }
}

/// Settings for a single simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub samples: usize,
    /// Fixed seed for reproducible draws. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn new(samples: usize) -> Self { Self { samples, seed: None } }

    pub fn seeded(samples: usize, seed: u64) -> Self { Self { samples, seed: Some(seed) } }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SemError::Config(format!("Invalid simulation JSON: {}", e)))
    }
}
