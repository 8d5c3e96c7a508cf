use crate::compute::bytecode::{Compiler, Program, Source};
use crate::compute::kernel;
use crate::compute::ledger::SampleTable;
use crate::config::SimulationConfig;
use crate::error::{Result, SemError};
use crate::graph::CausalGraph;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct Engine;

impl Engine {
    /// Executes the program against a pre-sized table, writing every column.
    pub fn run<R: Rng + ?Sized>(program: &Program, table: &mut SampleTable, rng: &mut R) -> Result<()> {
        Self::validate_memory_layout(program, table)?;

        for inst in &program.instructions {
            let target = inst.target as usize;
            match inst.source {
                Source::Fixed(value) => table.slot_mut(target).fill(value),
                Source::Noise(noise) => {
                    kernel::fill_noise(table.slot_mut(target), noise, rng)?;
                    for &(parent, coef) in &inst.terms {
                        let (dest, src) = table.slot_pair(target, parent as usize);
                        kernel::axpy(dest, coef, src);
                    }
                }
            }
            if !table.slot(target).iter().all(|v| v.is_finite()) {
                let column = program.column_names[target].clone();
                tracing::warn!(%column, "Simulated values overflowed");
                return Err(SemError::NonFinite { column });
            }
        }

        Ok(())
    }

    /// Bounds checking before execution starts.
    fn validate_memory_layout(program: &Program, table: &SampleTable) -> Result<()> {
        let slots = program.slot_count();

        if table.column_count() != slots || table.raw_data_len() != slots * table.rows() {
            return Err(SemError::invalid(format!(
                "Table holds {} values in {} columns, program needs {} columns of {} rows",
                table.raw_data_len(),
                table.column_count(),
                slots,
                table.rows()
            )));
        }

        for inst in &program.instructions {
            let out_of_range = inst.target as usize >= slots
                || inst.terms.iter().any(|&(p, _)| p as usize >= slots || p == inst.target);
            if out_of_range {
                return Err(SemError::invalid(format!("Instruction for slot {} has invalid operands", inst.target)));
            }
        }
        Ok(())
    }
}

/// Draws `config.samples` rows from the model.
pub fn simulate(graph: &CausalGraph, config: &SimulationConfig) -> Result<SampleTable> {
    simulate_with(graph, config, &[])
}

/// Draws from the model after forcing each `(node, value)` in `interventions`.
pub fn simulate_with(
    graph: &CausalGraph,
    config: &SimulationConfig,
    interventions: &[(&str, f64)],
) -> Result<SampleTable> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    simulate_with_rng(graph, config.samples, interventions, &mut rng)
}

/// As `simulate_with`, drawing from a caller-owned generator.
pub fn simulate_with_rng<R: Rng + ?Sized>(
    graph: &CausalGraph,
    samples: usize,
    interventions: &[(&str, f64)],
    rng: &mut R,
) -> Result<SampleTable> {
    if samples == 0 {
        return Err(SemError::invalid("Sample count must be positive"));
    }

    let program = Compiler::new(graph).compile(interventions)?;
    let mut table = SampleTable::zeroed(program.column_names.clone(), samples);
    Engine::run(&program, &mut table, rng)?;

    tracing::debug!(samples, columns = table.column_count(), "Simulated structural model");
    Ok(table)
}
