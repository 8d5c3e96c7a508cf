use causal_sem_core::{simulate, CausalGraph, ModelSpec, NodeMetadata, NoiseSpec, SemError, SimulationConfig};
use proptest::prelude::*;
use std::collections::HashSet;

/// Random DAG over `n` nodes: edges only run from a lower to a higher index.
fn dag_spec(n: usize, raw_edges: Vec<(usize, usize, f64)>) -> ModelSpec {
    let mut seen = HashSet::new();
    let edges: Vec<(String, String, f64)> = raw_edges
        .into_iter()
        .filter(|&(a, b, _)| a < b && seen.insert((a, b)))
        .map(|(a, b, c)| (format!("v{}", a), format!("v{}", b), c))
        .collect();

    let mut spec = ModelSpec::from_edges(edges.iter().map(|(a, b, c)| (a.as_str(), b.as_str(), *c)));
    for i in 0..n {
        let name = format!("v{}", i);
        if !spec.edges.iter().any(|e| e.source == name || e.target == name) {
            spec = spec.with_node(NodeMetadata { name, noise: NoiseSpec::standard() });
        }
    }
    spec
}

fn dag_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, f64)>)> {
    (1usize..8).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n, -2.0f64..2.0), 0..20)))
}

proptest! {
    #[test]
    fn acyclic_models_simulate_to_full_finite_tables(
        (n, edges) in dag_strategy(),
        samples in 1usize..200,
        seed in any::<u64>(),
    ) {
        let graph = CausalGraph::from_spec(&dag_spec(n, edges)).unwrap();
        let table = simulate(&graph, &SimulationConfig::seeded(samples, seed)).unwrap();

        prop_assert_eq!(table.rows(), samples);
        prop_assert_eq!(table.column_count(), n);
        for name in table.column_names() {
            prop_assert!(table.column(name).unwrap().iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn topological_order_respects_every_edge((n, edges) in dag_strategy()) {
        let graph = CausalGraph::from_spec(&dag_spec(n, edges)).unwrap();
        for edge in graph.edges() {
            let s = graph.node_id(&edge.source).unwrap();
            let t = graph.node_id(&edge.target).unwrap();
            prop_assert!(graph.rank(s) < graph.rank(t));
        }
    }

    #[test]
    fn closing_a_chain_into_a_loop_is_rejected(len in 2usize..10, coef in -3.0f64..3.0) {
        let names: Vec<String> = (0..len).map(|i| format!("n{}", i)).collect();
        let mut triples: Vec<(&str, &str, f64)> = names.windows(2).map(|w| (w[0].as_str(), w[1].as_str(), coef)).collect();
        triples.push((names[len - 1].as_str(), names[0].as_str(), coef));

        let err = CausalGraph::from_edges(triples).unwrap_err();
        let is_structure = matches!(err, SemError::Structure { .. });
        prop_assert!(is_structure);
    }
}
