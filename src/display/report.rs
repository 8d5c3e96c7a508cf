//! Plain-text renderings of models and fits.
use crate::estimator::{Fit, TwoStageFit};
use crate::graph::CausalGraph;
use crate::store::NoiseSpec;
use std::fmt;

impl fmt::Display for NoiseSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseSpec::Gaussian { scale } => write!(f, "N(0, {:.3})", scale),
            NoiseSpec::Uniform { half_width } => write!(f, "U(-{:.3}, {:.3})", half_width, half_width),
        }
    }
}

/// One structural equation per line, in evaluation order.
impl fmt::Display for CausalGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &node in self.topological_order() {
            let name = self.name(node);
            write!(f, "{} = ", name)?;
            for (&parent, &c) in self.parents(node).iter().zip(self.coefficients(node)) {
                write!(f, "{:.3}*{} + ", c, self.name(parent))?;
            }
            writeln!(f, "e[{}] ~ {}", name, self.noise(node))?;
        }
        Ok(())
    }
}

fn opt(v: Option<f64>, width: usize) -> String {
    match v {
        Some(v) => format!("{:>width$.4}", v, width = width),
        None => format!("{:>width$}", "-", width = width),
    }
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<&str> = self.coefficients.iter().map(|c| c.name.as_str()).collect();
        writeln!(
            f,
            "OLS {} ~ {}  (n = {}, df = {}, R^2 = {:.4})",
            self.response,
            terms.join(" + "),
            self.rows,
            self.df_resid,
            self.r_squared
        )?;
        let width = terms.iter().map(|t| t.len()).max().unwrap_or(0).max(4);
        writeln!(f, "{:<width$} {:>10} {:>10} {:>10} {:>10}", "term", "estimate", "std.err", "t", "p", width = width)?;
        for c in &self.coefficients {
            writeln!(
                f,
                "{:<width$} {:>10.4} {} {} {}",
                c.name,
                c.estimate,
                opt(c.std_error, 10),
                opt(c.t_stat, 10),
                opt(c.p_value, 10),
                width = width
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for TwoStageFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stage 1:")?;
        write!(f, "{}", self.first_stage)?;
        writeln!(f, "Stage 2:")?;
        write!(f, "{}", self.second_stage)?;
        writeln!(f, "Instrumented effect: {:.4}", self.effect())
    }
}
