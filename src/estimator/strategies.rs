//! The three ways the estimator is put to work on causal questions.
//!
//! Choosing the adjustment set is left to the caller: nothing here inspects the
//! graph to decide which variables block which backdoor paths.
use super::ols::{fit, Fit};
use super::problem::FitOptions;
use crate::compute::SampleTable;
use crate::error::{Result, SemError};

/// Response on treatment alone. Biased whenever a backdoor path is left open.
pub fn naive(table: &SampleTable, response: &str, treatment: &str) -> Result<Fit> {
    fit(table, response, &[treatment], FitOptions::default())
}

/// Response on treatment plus `adjustment`.
///
/// Unbiased for the direct effect of treatment when `adjustment` blocks every
/// backdoor path and opens no new ones (e.g. by conditioning on a collider).
pub fn adjusted(table: &SampleTable, response: &str, treatment: &str, adjustment: &[&str]) -> Result<Fit> {
    let mut predictors = Vec::with_capacity(adjustment.len() + 1);
    predictors.push(treatment);
    predictors.extend_from_slice(adjustment);
    fit(table, response, &predictors, FitOptions::default())
}

/// Both stages of an instrumental-variable estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoStageFit {
    /// treatment ~ instrument
    pub first_stage: Fit,
    /// response ~ derived column
    pub second_stage: Fit,
    pub instrument: String,
    /// Name of the `delta_hat * instrument` column used in the second stage.
    pub derived_column: String,
    delta_hat: f64,
    effect: f64,
}

impl TwoStageFit {
    /// The instrumented estimate of the treatment's effect on the response.
    pub fn effect(&self) -> f64 { self.effect }

    /// First-stage slope of treatment on the instrument.
    pub fn instrument_strength(&self) -> f64 { self.delta_hat }
}

/// Two-stage least squares with a single instrument.
///
/// 1. Fit `treatment ~ instrument`, giving slope `delta_hat`.
/// 2. Derive `delta_hat * instrument` for every row. This is the part of the
///    treatment explained by the instrument, hence uncorrelated with any
///    unmeasured confounder of treatment and response.
/// 3. Fit `response ~ derived`; its slope estimates the treatment effect.
///
/// Second-stage standard errors are the naive OLS ones and understate the
/// uncertainty of the instrumented estimate.
pub fn two_stage(table: &SampleTable, response: &str, treatment: &str, instrument: &str) -> Result<TwoStageFit> {
    if instrument == treatment || instrument == response || treatment == response {
        return Err(SemError::invalid(format!(
            "Response '{}', treatment '{}' and instrument '{}' must be distinct",
            response, treatment, instrument
        )));
    }
    // Surface unknown names as argument errors before any fitting.
    table.column(response)?;

    let first_stage = fit(table, treatment, &[instrument], FitOptions::default())?;
    let delta_hat = first_stage.coefficient(instrument)?;
    tracing::debug!(treatment, instrument, delta_hat, "IV first stage");

    let derived: Vec<f64> = table.column(instrument)?.iter().map(|z| delta_hat * z).collect();
    let derived_column = unique_name(table, &format!("{}_hat", treatment));
    let augmented = table.with_column(derived_column.clone(), derived)?;

    let second_stage = fit(&augmented, response, &[derived_column.as_str()], FitOptions::default())?;
    let effect = second_stage.coefficient(&derived_column)?;
    tracing::debug!(response, effect, "IV second stage");

    Ok(TwoStageFit {
        first_stage,
        second_stage,
        instrument: instrument.to_string(),
        derived_column,
        delta_hat,
        effect,
    })
}

fn unique_name(table: &SampleTable, base: &str) -> String {
    let mut candidate = base.to_string();
    let mut counter = 1;
    while table.contains(&candidate) {
        candidate = format!("{}_{}", base, counter);
        counter += 1;
    }
    candidate
}
