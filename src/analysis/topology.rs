use crate::error::{Result, SemError};
use crate::store::{NodeId, Registry};
use petgraph::algo::{kosaraju_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashSet, VecDeque};

/// Orders the nodes so that every parent appears before its children and the
/// structural equations can be evaluated front to back.
///
/// Iterative, so arbitrarily long chains are safe. Fails with `SemError::Structure`
/// naming every node that sits on a cycle.
pub fn sort(registry: &Registry) -> Result<Vec<NodeId>> {
    let graph = as_petgraph(registry);
    match toposort(&graph, None) {
        Ok(order) => Ok(order.into_iter().map(|n| NodeId::new(n.index())).collect()),
        Err(_) => Err(cycle_error(registry)),
    }
}

/// Groups the nodes that participate in cycles, one group per strongly connected component.
pub fn cycles(registry: &Registry) -> Vec<Vec<NodeId>> {
    let graph = as_petgraph(registry);
    let mut groups: Vec<Vec<NodeId>> = kosaraju_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .map(|scc| {
            let mut ids: Vec<NodeId> = scc.into_iter().map(|n| NodeId::new(n.index())).collect();
            ids.sort();
            ids
        })
        .collect();
    groups.sort();
    groups
}

fn cycle_error(registry: &Registry) -> SemError {
    let described = cycles(registry)
        .iter()
        .map(|group| {
            let names: Vec<&str> = group.iter().map(|&id| registry.name(id)).collect();
            format!("{{{}}}", names.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ");
    SemError::structure(format!("Cycle detected among nodes {}", described))
}

fn as_petgraph(registry: &Registry) -> DiGraph<(), ()> {
    let mut graph = DiGraph::with_capacity(registry.count(), registry.edge_count());
    for _ in 0..registry.count() {
        graph.add_node(());
    }
    for child in 0..registry.count() {
        for parent in registry.get_parents(NodeId::new(child)) {
            graph.add_edge(NodeIndex::new(parent.index()), NodeIndex::new(child), ());
        }
    }
    graph
}

/// Identifies all nodes downstream from the given start nodes (start nodes included).
pub fn downstream_from(registry: &Registry, start_nodes: &[NodeId]) -> HashSet<NodeId> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from(start_nodes.to_vec());

    while let Some(node) = queue.pop_front() {
        if visited.insert(node) {
            queue.extend(registry.children(node));
        }
    }
    visited
}

/// Identifies all nodes upstream from the given start nodes (start nodes included).
pub fn upstream_from(registry: &Registry, start_nodes: &[NodeId]) -> HashSet<NodeId> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from(start_nodes.to_vec());

    while let Some(node) = queue.pop_front() {
        if visited.insert(node) {
            queue.extend(registry.get_parents(node).iter().copied());
        }
    }
    visited
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> (Registry, [NodeId; 4]) {
        // Shape: A -> B, A -> C, B+C -> D
        let mut reg = Registry::new();
        let a = reg.intern("A");
        let b = reg.intern("B");
        let c = reg.intern("C");
        let d = reg.intern("D");
        reg.set_topology(vec![
            vec![],
            vec![(a, 1.0)],
            vec![(a, 1.0)],
            vec![(b, 1.0), (c, 1.0)],
        ]);
        (reg, [a, b, c, d])
    }

    #[test]
    fn test_sort_diamond_dependency() {
        let (reg, [a, b, c, d]) = diamond();
        let res = sort(&reg).expect("Sort failed");

        let pos = |id: NodeId| res.iter().position(|&x| x == id).unwrap();
        assert!(pos(a) < pos(b));
        assert!(pos(a) < pos(c));
        assert!(pos(b) < pos(d));
        assert!(pos(c) < pos(d));
    }

    #[test]
    fn test_sort_children_registered_before_parents() {
        // y is registered first but depends on x.
        let mut reg = Registry::new();
        let y = reg.intern("y");
        let x = reg.intern("x");
        reg.set_topology(vec![vec![(x, 0.5)], vec![]]);
        assert_eq!(sort(&reg).unwrap(), vec![x, y]);
    }

    #[test]
    fn test_cycle_detection_names_members() {
        // a -> b -> c -> a, plus an innocent root r -> a
        let mut reg = Registry::new();
        let r = reg.intern("r");
        let a = reg.intern("a");
        let b = reg.intern("b");
        let c = reg.intern("c");
        reg.set_topology(vec![vec![], vec![(r, 1.0), (c, 1.0)], vec![(a, 1.0)], vec![(b, 1.0)]]);

        assert_eq!(cycles(&reg), vec![vec![a, b, c]]);
        let err = sort(&reg).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Cycle detected"), "Msg: {}", msg);
        assert!(msg.contains("{a, b, c}"), "Msg: {}", msg);
        assert!(!msg.contains("{r"), "Root must not be reported: {}", msg);
    }

    #[test]
    fn test_sort_long_chain() {
        // n0 -> n1 -> ... -> n99999, registered tail first.
        let n = 100_000;
        let mut reg = Registry::new();
        let ids: Vec<NodeId> = (0..n).rev().map(|i| reg.intern(&format!("n{}", i))).collect();
        // ids[k] is n{n-1-k}; its parent is ids[k + 1].
        let parents = (0..n).map(|k| if k + 1 < n { vec![(ids[k + 1], 1.0)] } else { vec![] }).collect();
        reg.set_topology(parents);

        let order = sort(&reg).unwrap();
        assert_eq!(order.len(), n);
        assert_eq!(order[0], ids[n - 1]);
        assert_eq!(order[n - 1], ids[0]);
    }

    #[test]
    fn test_long_cycle_is_reported() {
        // n0 -> n1 -> ... -> n99999 -> n0
        let n = 100_000;
        let mut reg = Registry::new();
        let ids: Vec<NodeId> = (0..n).map(|i| reg.intern(&format!("n{}", i))).collect();
        let parents = (0..n).map(|k| vec![(ids[(k + n - 1) % n], 1.0)]).collect();
        reg.set_topology(parents);

        assert!(matches!(sort(&reg), Err(SemError::Structure { .. })));
        assert_eq!(cycles(&reg)[0].len(), n);
    }

    #[test]
    fn test_upstream_and_downstream() {
        let (reg, [a, b, c, d]) = diamond();
        assert_eq!(downstream_from(&reg, &[b]), HashSet::from([b, d]));
        assert_eq!(upstream_from(&reg, &[b]), HashSet::from([a, b]));
        assert_eq!(upstream_from(&reg, &[d]).len(), 4);
        assert_eq!(downstream_from(&reg, &[a]), HashSet::from([a, b, c, d]));
        assert!(!downstream_from(&reg, &[c]).contains(&b));
    }
}
