use super::types::*;
use std::collections::HashMap;

/// Columnar storage for the nodes and weighted edges of a structural model.
///
/// Parents are kept in a CSR layout (flat arrays + `(start, count)` ranges) with the
/// coefficient of each incoming edge stored alongside its parent. Children are kept
/// as an intrusive linked list so downstream traversals need no extra allocation.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub meta: Vec<NodeMetadata>,

    // Topology (CSR-ish + Adjacency)
    pub parents_flat: Vec<NodeId>,
    pub coefficients_flat: Vec<f64>,
    pub parents_ranges: Vec<(u32, u32)>, // (start, count)

    // Downstream traversal helpers
    pub first_child: Vec<u32>,
    pub child_targets: Vec<NodeId>,
    pub next_child: Vec<u32>,

    pub name_index: HashMap<String, NodeId>,
}

impl Registry {
    pub fn new() -> Self { Self::default() }
    pub fn count(&self) -> usize { self.meta.len() }
    pub fn edge_count(&self) -> usize { self.parents_flat.len() }

    /// Registers a node, or returns the existing id when the name is already known.
    pub fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.name_index.get(name) {
            return id;
        }
        self.add_node(NodeMetadata { name: name.to_string(), noise: NoiseSpec::default() })
    }

    /// Appends a node with no parents. Names are not checked here; see `intern`.
    pub fn add_node(&mut self, meta: NodeMetadata) -> NodeId {
        let id = NodeId::new(self.meta.len());
        self.name_index.insert(meta.name.clone(), id);
        self.meta.push(meta);
        self.parents_ranges.push((self.parents_flat.len() as u32, 0));
        self.first_child.push(u32::MAX);
        id
    }

    /// Replaces the whole topology in one pass.
    ///
    /// `parents[i]` lists the `(parent, coefficient)` pairs feeding node `i`. Unlike
    /// appending nodes one at a time this accepts any edge order, including cyclic
    /// ones, so that the topology pass can report the cycle.
    pub fn set_topology(&mut self, parents: Vec<Vec<(NodeId, f64)>>) {
        let count = self.count();
        debug_assert_eq!(parents.len(), count);

        self.parents_flat.clear();
        self.coefficients_flat.clear();
        self.parents_ranges.clear();
        self.child_targets.clear();
        self.next_child.clear();
        self.first_child = vec![u32::MAX; count];

        for (idx, incoming) in parents.into_iter().enumerate() {
            let child = NodeId::new(idx);

            // 1. Register Parents
            let start = self.parents_flat.len() as u32;
            self.parents_ranges.push((start, incoming.len() as u32));

            for (parent, coefficient) in incoming {
                self.parents_flat.push(parent);
                self.coefficients_flat.push(coefficient);

                // 2. Register Children (Adjacency list for downstream lookups)
                let p_idx = parent.index();
                let head = self.first_child[p_idx];
                let new_edge = self.child_targets.len() as u32;
                self.child_targets.push(child);
                self.next_child.push(head);
                self.first_child[p_idx] = new_edge;
            }
        }
    }

    #[inline(always)]
    pub fn get_parents(&self, id: NodeId) -> &[NodeId] {
        let (start, count) = self.parents_ranges[id.index()];
        &self.parents_flat[start as usize..(start + count) as usize]
    }

    #[inline(always)]
    pub fn get_coefficients(&self, id: NodeId) -> &[f64] {
        let (start, count) = self.parents_ranges[id.index()];
        &self.coefficients_flat[start as usize..(start + count) as usize]
    }

    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        ChildIter { registry: self, edge_idx: self.first_child[id.index()] }
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    pub fn name(&self, id: NodeId) -> &str { &self.meta[id.index()].name }
}

/// Walks the child linked list of a single node.
pub struct ChildIter<'a> {
    registry: &'a Registry,
    edge_idx: u32,
}

impl Iterator for ChildIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.edge_idx == u32::MAX {
            return None;
        }
        let idx = self.edge_idx as usize;
        self.edge_idx = self.registry.next_child[idx];
        Some(self.registry.child_targets[idx])
    }
}
