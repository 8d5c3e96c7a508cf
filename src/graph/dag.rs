//! dag.rs
//! An immutable, validated causal DAG wrapping the columnar `Registry`.

use crate::analysis::{topology, validation};
use crate::config::ModelSpec;
use crate::error::{Result, SemError};
use crate::store::{EdgeSpec, NodeId, NodeMetadata, NoiseSpec, Registry};
use std::collections::HashSet;

/// A linear structural causal model.
///
/// Built once from a complete edge list and checked for acyclicity on construction;
/// there is no way to add or remove edges afterwards. The topological order is
/// computed up front and every node's rank in it is fixed.
#[derive(Debug, Clone)]
pub struct CausalGraph {
    pub(crate) store: Registry,
    order: Vec<NodeId>,
    rank: Vec<usize>,
}

impl CausalGraph {
    /// Builds a graph from `(source, target, coefficient)` triples with standard-normal noise everywhere.
    pub fn from_edges<E: Into<EdgeSpec>>(edges: impl IntoIterator<Item = E>) -> Result<Self> {
        Self::from_spec(&ModelSpec::from_edges(edges))
    }

    pub fn from_spec(spec: &ModelSpec) -> Result<Self> {
        validation::validate(spec).map_err(|errs| {
            let msg = errs.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n");
            SemError::structure(msg)
        })?;

        let mut store = Registry::new();
        for node in &spec.nodes {
            store.add_node(node.clone());
        }

        let mut parents: Vec<Vec<(NodeId, f64)>> = Vec::new();
        for edge in &spec.edges {
            let source = store.intern(&edge.source);
            let target = store.intern(&edge.target);
            parents.resize(store.count(), Vec::new());
            parents[target.index()].push((source, edge.coefficient));
        }
        parents.resize(store.count(), Vec::new());
        store.set_topology(parents);

        let order = topology::sort(&store)?;
        let mut rank = vec![0; order.len()];
        for (pos, id) in order.iter().enumerate() {
            rank[id.index()] = pos;
        }

        tracing::debug!(nodes = store.count(), edges = store.edge_count(), "Built causal graph");
        Ok(Self { store, order, rank })
    }

    pub fn node_count(&self) -> usize { self.store.count() }

    pub fn edge_count(&self) -> usize { self.store.edge_count() }

    /// Nodes in evaluation order: every parent precedes its children.
    pub fn topological_order(&self) -> &[NodeId] { &self.order }

    pub fn rank(&self, id: NodeId) -> usize { self.rank[id.index()] }

    pub fn node_id(&self, name: &str) -> Result<NodeId> {
        self.store.lookup(name).ok_or_else(|| SemError::invalid(format!("Unknown node '{}'", name)))
    }

    pub fn contains(&self, name: &str) -> bool { self.store.lookup(name).is_some() }

    pub fn name(&self, id: NodeId) -> &str { self.store.name(id) }

    /// Node names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.store.meta.iter().map(|m| m.name.as_str())
    }

    pub fn noise(&self, id: NodeId) -> NoiseSpec { self.store.meta[id.index()].noise }

    pub fn meta(&self, id: NodeId) -> &NodeMetadata { &self.store.meta[id.index()] }

    pub fn parents(&self, id: NodeId) -> &[NodeId] { self.store.get_parents(id) }

    pub fn coefficients(&self, id: NodeId) -> &[f64] { self.store.get_coefficients(id) }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ { self.store.children(id) }

    pub fn is_root(&self, id: NodeId) -> bool { self.parents(id).is_empty() }

    /// Coefficient on the edge `source -> target`, if the edge exists.
    pub fn edge_coefficient(&self, source: NodeId, target: NodeId) -> Option<f64> {
        self.parents(target)
            .iter()
            .zip(self.coefficients(target))
            .find(|(p, _)| **p == source)
            .map(|(_, &c)| c)
    }

    /// All edges as triples, grouped by target in registration order.
    pub fn edges(&self) -> Vec<EdgeSpec> {
        let mut out = Vec::with_capacity(self.edge_count());
        for target in (0..self.node_count()).map(NodeId::new) {
            for (&source, &c) in self.parents(target).iter().zip(self.coefficients(target)) {
                out.push(EdgeSpec::new(self.name(source), self.name(target), c));
            }
        }
        out
    }

    pub fn ancestors(&self, id: NodeId) -> HashSet<NodeId> {
        let mut set = topology::upstream_from(&self.store, &[id]);
        set.remove(&id);
        set
    }

    pub fn descendants(&self, id: NodeId) -> HashSet<NodeId> {
        let mut set = topology::downstream_from(&self.store, &[id]);
        set.remove(&id);
        set
    }

    /// Reconstructs a `ModelSpec` that builds an identical graph.
    pub fn to_spec(&self) -> ModelSpec {
        ModelSpec { nodes: self.store.meta.clone(), edges: self.edges() }
    }
}
