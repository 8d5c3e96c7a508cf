//! Path analysis over linear structural models.
//!
//! In a linear SEM the causal effect of `a` on `b` is the sum, over every directed
//! path from `a` to `b`, of the product of the coefficients along that path. These
//! are the population quantities the estimators in this crate try to recover.
use crate::error::Result;
use crate::graph::CausalGraph;
use crate::store::NodeId;

/// Total causal effect of `from` on `to`: the change in `to` per unit intervention on `from`.
///
/// Zero when no directed path exists; one when `from == to`.
pub fn total_effect(graph: &CausalGraph, from: &str, to: &str) -> Result<f64> {
    let source = graph.node_id(from)?;
    let target = graph.node_id(to)?;

    // effect[v] = d v / d source, filled in topological order.
    let mut effect = vec![0.0; graph.node_count()];
    effect[source.index()] = 1.0;

    for &node in &graph.topological_order()[graph.rank(source) + 1..] {
        let acc: f64 = graph
            .parents(node)
            .iter()
            .zip(graph.coefficients(node))
            .map(|(p, c)| c * effect[p.index()])
            .sum();
        effect[node.index()] = acc;
        if node == target {
            break;
        }
    }

    Ok(effect[target.index()])
}

/// Coefficient on the edge `from -> to`, or zero when the edge is absent.
pub fn direct_effect(graph: &CausalGraph, from: &str, to: &str) -> Result<f64> {
    let source = graph.node_id(from)?;
    let target = graph.node_id(to)?;
    Ok(graph.edge_coefficient(source, target).unwrap_or(0.0))
}

/// Every directed path `from -> ... -> to`, as node names.
pub fn directed_paths(graph: &CausalGraph, from: &str, to: &str) -> Result<Vec<Vec<String>>> {
    let source = graph.node_id(from)?;
    let target = graph.node_id(to)?;

    // Explicit stacks: `path` is the walk so far, `pending[i]` the unexplored children of `path[i]`.
    let mut paths = Vec::new();
    let mut path = vec![source];
    let mut pending = vec![next_hops(graph, source, target)];

    while let (Some(&head), Some(frontier)) = (path.last(), pending.last_mut()) {
        if head == target {
            paths.push(path.iter().map(|&id| graph.name(id).to_string()).collect());
        } else if let Some(child) = frontier.pop() {
            path.push(child);
            pending.push(next_hops(graph, child, target));
            continue;
        }
        path.pop();
        pending.pop();
    }
    Ok(paths)
}

/// Children of `node` that can still reach `target`, lowest rank last so it is popped first.
fn next_hops(graph: &CausalGraph, node: NodeId, target: NodeId) -> Vec<NodeId> {
    if node == target {
        return Vec::new();
    }
    // Children ranked past the target can never reach it.
    let mut next: Vec<_> = graph.children(node).filter(|&c| graph.rank(c) <= graph.rank(target)).collect();
    next.sort_by_key(|&c| std::cmp::Reverse(graph.rank(c)));
    next
}
