use crate::error::{Result, SemError};
use crate::graph::CausalGraph;
use crate::store::{NodeId, NoiseSpec};
use smallvec::SmallVec;
use std::collections::HashMap;

/// How the value of a node is produced before its parents are added in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source {
    /// Structural equation: draw noise, then accumulate parents.
    Noise(NoiseSpec),
    /// `do(node = value)`: constant column, parents ignored.
    Fixed(f64),
}

/// One structural equation, lowered to slot indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub target: u32,
    pub source: Source,
    /// `(parent slot, coefficient)`. Most nodes have a handful of parents.
    pub terms: SmallVec<[(u32, f64); 4]>,
}

/// The execution tape for a simulation.
///
/// Instruction `i` may only read slots written by instructions `0..i`; the compiler
/// guarantees this by emitting in topological order. Slot `k` is node `k`, so the
/// resulting table lists columns in node registration order.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    pub column_names: Vec<String>,
}

impl Program {
    pub fn slot_count(&self) -> usize { self.column_names.len() }
}

pub struct Compiler<'a> {
    graph: &'a CausalGraph,
}

impl<'a> Compiler<'a> {
    pub fn new(graph: &'a CausalGraph) -> Self {
        Self { graph }
    }

    /// Lowers the graph to a linear program, applying `interventions` as fixed sources.
    pub fn compile(&self, interventions: &[(&str, f64)]) -> Result<Program> {
        let mut fixed: HashMap<NodeId, f64> = HashMap::with_capacity(interventions.len());
        for &(name, value) in interventions {
            let id = self.graph.node_id(name)?;
            if !value.is_finite() {
                return Err(SemError::invalid(format!("Intervention on '{}' must be finite, got {}", name, value)));
            }
            if fixed.insert(id, value).is_some() {
                return Err(SemError::invalid(format!("Node '{}' intervened on more than once", name)));
            }
        }

        let instructions: Vec<Instruction> = self
            .graph
            .topological_order()
            .iter()
            .map(|&node| match fixed.get(&node) {
                Some(&value) => Instruction { target: node.0, source: Source::Fixed(value), terms: SmallVec::new() },
                None => Instruction {
                    target: node.0,
                    source: Source::Noise(self.graph.noise(node)),
                    terms: self
                        .graph
                        .parents(node)
                        .iter()
                        .zip(self.graph.coefficients(node))
                        .map(|(p, &c)| (p.0, c))
                        .collect(),
                },
            })
            .collect();

        tracing::debug!(
            instructions = instructions.len(),
            interventions = fixed.len(),
            "Compiled structural program"
        );

        Ok(Program { instructions, column_names: self.graph.names().map(String::from).collect() })
    }
}
