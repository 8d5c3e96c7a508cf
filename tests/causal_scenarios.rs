use causal_sem_core::analysis::paths;
use causal_sem_core::estimator::{self, replicate};
use causal_sem_core::{simulate, simulate_with, CausalGraph, ModelSpec, NodeMetadata, NoiseSpec, SemError, SimulationConfig};

fn node(name: &str, scale: f64) -> NodeMetadata {
    NodeMetadata { name: name.into(), noise: NoiseSpec::gaussian(scale) }
}

fn confounded() -> CausalGraph {
    CausalGraph::from_edges([("h", "x", 1.0), ("h", "y", 2.0), ("x", "y", 3.0)]).unwrap()
}

#[test]
fn confounder_biases_naive_and_adjustment_recovers_effect() {
    let spec = ModelSpec::from_edges([("h", "x", 1.0), ("h", "y", 2.0), ("x", "y", 3.0)])
        .with_node(node("h", 1.0))
        .with_node(node("x", 0.8))
        .with_node(node("y", 0.5));
    let graph = CausalGraph::from_spec(&spec).unwrap();
    let table = simulate(&graph, &SimulationConfig::seeded(1000, 2024)).unwrap();

    let naive = estimator::naive(&table, "y", "x").unwrap().coefficient("x").unwrap();
    let adjusted = estimator::adjusted(&table, "y", "x", &["h"]).unwrap();

    // Population naive slope: 3 + 2 * cov(x, h) / var(x) = 3 + 2 / 1.64
    assert!(naive > 3.8, "naive {}", naive);
    assert!((adjusted.coefficient("x").unwrap() - 3.0).abs() < 0.2, "{}", adjusted);
    assert!((adjusted.coefficient("h").unwrap() - 2.0).abs() < 0.2, "{}", adjusted);
}

#[test]
fn instrument_beats_naive_across_replications() {
    // x = 1*i + 1*h + n_x, y = 2*x + 3*h + n_y; h unobserved.
    let graph = CausalGraph::from_edges([("i", "x", 1.0), ("h", "x", 1.0), ("x", "y", 2.0), ("h", "y", 3.0)]).unwrap();
    let config = SimulationConfig::seeded(2000, 77);
    let alpha = 2.0;

    let iv = replicate(&graph, &config, 20, alpha, |t| Ok(estimator::two_stage(t, "y", "x", "i")?.effect())).unwrap();
    let naive = replicate(&graph, &config, 20, alpha, |t| estimator::naive(t, "y", "x")?.coefficient("x")).unwrap();

    // Population naive slope: 2 + 3 * 1 / 3 = 3.
    assert!((naive.mean_estimate - 3.0).abs() < 0.1, "naive mean {}", naive.mean_estimate);
    assert!(iv.bias.abs() < 0.1, "iv bias {}", iv.bias);
    assert!(iv.mean_abs_error < naive.mean_abs_error);
    for (a, b) in iv.estimates.iter().zip(&naive.estimates) {
        assert!((a - alpha).abs() < (b - alpha).abs(), "iv {} vs naive {}", a, b);
    }
}

#[test]
fn two_stage_first_stage_recovers_instrument_strength() {
    let graph = CausalGraph::from_edges([("i", "x", 1.5), ("h", "x", 1.0), ("x", "y", 2.0), ("h", "y", 3.0)]).unwrap();
    let table = simulate(&graph, &SimulationConfig::seeded(3000, 5)).unwrap();
    let iv = estimator::two_stage(&table, "y", "x", "i").unwrap();
    assert!((iv.instrument_strength() - 1.5).abs() < 0.1);
    assert!((iv.effect() - 2.0).abs() < 0.15, "{}", iv);
    // The source table is untouched by the derived column.
    assert!(!table.contains(&iv.derived_column));
}

#[test]
fn conditioning_off_the_confounding_path_does_not_help() {
    // d is a child of the response; u is unrelated to everything.
    let spec = ModelSpec::from_edges([("h", "x", 1.0), ("h", "y", 2.0), ("x", "y", 3.0), ("y", "d", 1.0)])
        .with_node(node("u", 1.0));
    let graph = CausalGraph::from_spec(&spec).unwrap();
    let table = simulate(&graph, &SimulationConfig::seeded(5000, 99)).unwrap();
    let alpha = 3.0;

    let naive = estimator::naive(&table, "y", "x").unwrap().coefficient("x").unwrap();
    let on_descendant = estimator::adjusted(&table, "y", "x", &["d"]).unwrap().coefficient("x").unwrap();
    let on_unrelated = estimator::adjusted(&table, "y", "x", &["u"]).unwrap().coefficient("x").unwrap();

    assert!((on_descendant - alpha).abs() > (naive - alpha).abs(), "descendant {} naive {}", on_descendant, naive);
    assert!((on_unrelated - alpha).abs() > 0.5, "unrelated {}", on_unrelated);
    assert!((on_unrelated - naive).abs() < 0.1);
}

#[test]
fn exact_copy_of_a_predictor_is_singular() {
    // x2 is a noiseless multiple of x.
    let spec = ModelSpec::from_edges([("x", "x2", 2.0), ("x", "y", 1.0)]).with_node(node("x2", 0.0));
    let graph = CausalGraph::from_spec(&spec).unwrap();
    let table = simulate(&graph, &SimulationConfig::seeded(100, 3)).unwrap();

    let err = estimator::adjusted(&table, "y", "x", &["x2"]).unwrap_err();
    assert!(matches!(err, SemError::SingularMatrix { rank: 2, .. }), "{:?}", err);
}

#[test]
fn naive_matches_total_effect_and_adjustment_matches_direct_effect() {
    // No confounding; m mediates part of x's effect.
    let graph = CausalGraph::from_edges([("x", "m", 0.5), ("m", "y", 4.0), ("x", "y", 1.0)]).unwrap();
    let table = simulate(&graph, &SimulationConfig::seeded(4000, 8)).unwrap();

    let total = paths::total_effect(&graph, "x", "y").unwrap();
    let direct = paths::direct_effect(&graph, "x", "y").unwrap();
    assert_eq!(total, 3.0);

    let naive = estimator::naive(&table, "y", "x").unwrap().coefficient("x").unwrap();
    let through_m = estimator::adjusted(&table, "y", "x", &["m"]).unwrap().coefficient("x").unwrap();
    assert!((naive - total).abs() < 0.3, "naive {}", naive);
    assert!((through_m - direct).abs() < 0.1, "adjusted {}", through_m);
}

#[test]
fn interventions_recover_total_effect() {
    let graph = confounded();
    let cfg = SimulationConfig::seeded(4000, 12);
    let low = simulate_with(&graph, &cfg, &[("x", 0.0)]).unwrap();
    let high = simulate_with(&graph, &cfg, &[("x", 1.0)]).unwrap();
    let effect = high.mean("y").unwrap() - low.mean("y").unwrap();
    // Same seed, so the noise draws cancel exactly.
    assert!((effect - 3.0).abs() < 1e-9, "effect {}", effect);
}

#[test]
fn errors_surface_at_the_call_boundary() {
    let cyclic = CausalGraph::from_edges([("a", "b", 1.0), ("b", "a", 1.0)]);
    assert!(matches!(cyclic, Err(SemError::Structure { .. })));

    let graph = confounded();
    assert!(matches!(simulate(&graph, &SimulationConfig::new(0)), Err(SemError::InvalidArgument(_))));

    let table = simulate(&graph, &SimulationConfig::seeded(10, 1)).unwrap();
    assert!(matches!(estimator::naive(&table, "y", "w"), Err(SemError::InvalidArgument(_))));
    assert!(matches!(estimator::naive(&table, "w", "x"), Err(SemError::InvalidArgument(_))));
    assert!(matches!(simulate_with(&graph, &SimulationConfig::new(5), &[("w", 1.0)]), Err(SemError::InvalidArgument(_))));
}
