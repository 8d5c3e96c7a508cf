use crate::compute::{simulate, SampleTable};
use crate::config::SimulationConfig;
use crate::error::{Result, SemError};
use crate::graph::CausalGraph;

/// How an estimator behaved over repeated simulations of the same model.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasSummary {
    pub replications: usize,
    pub truth: f64,
    pub estimates: Vec<f64>,
    pub mean_estimate: f64,
    /// `mean_estimate - truth`
    pub bias: f64,
    pub mean_abs_error: f64,
}

/// Simulates `replications` independent tables and applies `estimator` to each.
///
/// With a seeded config, replication `r` uses seed `seed + r`, so the whole study is
/// reproducible. Runs sequentially.
pub fn replicate<F>(
    graph: &CausalGraph,
    config: &SimulationConfig,
    replications: usize,
    truth: f64,
    estimator: F,
) -> Result<BiasSummary>
where
    F: Fn(&SampleTable) -> Result<f64>,
{
    if replications == 0 {
        return Err(SemError::invalid("Replication count must be positive"));
    }

    let mut estimates = Vec::with_capacity(replications);
    for r in 0..replications {
        let run = SimulationConfig { samples: config.samples, seed: config.seed.map(|s| s.wrapping_add(r as u64)) };
        let table = simulate(graph, &run)?;
        estimates.push(estimator(&table)?);
    }

    let n = replications as f64;
    let mean_estimate = estimates.iter().sum::<f64>() / n;
    let mean_abs_error = estimates.iter().map(|e| (e - truth).abs()).sum::<f64>() / n;
    tracing::debug!(replications, truth, mean_estimate, mean_abs_error, "Replication study");

    Ok(BiasSummary { replications, truth, estimates, mean_estimate, bias: mean_estimate - truth, mean_abs_error })
}
