use super::problem::{DesignMatrix, FitOptions, INTERCEPT};
use super::qr::QrDecomposition;
use crate::compute::SampleTable;
use crate::error::{Result, SemError};
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::collections::BTreeMap;

/// One fitted coefficient with its sampling statistics.
///
/// The statistics are `None` when the fit has no residual degrees of freedom
/// (and `t_stat`/`p_value` also when the standard error is exactly zero).
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficient {
    pub name: String,
    pub estimate: f64,
    pub std_error: Option<f64>,
    pub t_stat: Option<f64>,
    pub p_value: Option<f64>,
}

/// Result of an ordinary least squares fit.
#[derive(Debug, Clone, PartialEq)]
pub struct Fit {
    pub response: String,
    /// In design order; the intercept, when present, comes first.
    pub coefficients: Vec<Coefficient>,
    pub rows: usize,
    pub df_resid: usize,
    pub r_squared: f64,
    /// `RSS / df_resid`.
    pub residual_variance: Option<f64>,
}

impl Fit {
    /// Estimated coefficient on `name`.
    pub fn coefficient(&self, name: &str) -> Result<f64> {
        self.get(name)
            .map(|c| c.estimate)
            .ok_or_else(|| SemError::invalid(format!("'{}' is not a term of this fit", name)))
    }

    pub fn get(&self, name: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|c| c.name == name)
    }

    pub fn intercept(&self) -> Option<f64> { self.get(INTERCEPT).map(|c| c.estimate) }

    /// Predictor name (and `const`) to estimate.
    pub fn params(&self) -> BTreeMap<String, f64> {
        self.coefficients.iter().map(|c| (c.name.clone(), c.estimate)).collect()
    }
}

/// Regresses `response` on `predictors` (plus an intercept, by default).
///
/// Fails with `SemError::SingularMatrix` if the design is rank-deficient, including
/// when there are fewer rows than columns.
pub fn fit(table: &SampleTable, response: &str, predictors: &[&str], options: FitOptions) -> Result<Fit> {
    let design = DesignMatrix::build(table, response, predictors, options)?;
    fit_design(&design)
}

pub fn fit_design(design: &DesignMatrix) -> Result<Fit> {
    let (n, p) = (design.rows(), design.cols());
    let qr = QrDecomposition::factor(&design.x, &design.y);

    tracing::debug!(response = %design.response, rows = n, columns = p, rank = qr.rank(), "OLS fit");
    let singular = || SemError::SingularMatrix { rank: qr.rank(), columns: design.columns.clone() };
    let beta = qr.solve().ok_or_else(singular)?;
    let unscaled = qr.unscaled_variances().ok_or_else(singular)?;

    // Residuals from the original design, not from Q^T y, to keep them exact.
    let residuals = &design.y - &design.x * &beta;
    let rss = residuals.norm_squared();

    let has_intercept = design.columns.first().map(|c| c == INTERCEPT).unwrap_or(false);
    let tss: f64 = if has_intercept {
        let mean = design.y.mean();
        design.y.iter().map(|v| (v - mean).powi(2)).sum()
    } else {
        design.y.norm_squared()
    };
    let r_squared = if tss > 0.0 { 1.0 - rss / tss } else { 1.0 };

    let df_resid = n - p;
    let residual_variance = (df_resid > 0).then(|| rss / df_resid as f64);
    if df_resid == 0 {
        tracing::warn!(response = %design.response, "Fit is exactly determined; no residual degrees of freedom");
    }

    let t_dist = match residual_variance {
        Some(_) => Some(
            StudentsT::new(0.0, 1.0, df_resid as f64)
                .map_err(|e| SemError::invalid(format!("Bad degrees of freedom {}: {}", df_resid, e)))?,
        ),
        None => None,
    };

    let coefficients = design
        .columns
        .iter()
        .zip(beta.iter().copied())
        .zip(unscaled)
        .map(|((name, estimate), d)| {
            let std_error = residual_variance.map(|s2| (s2 * d).sqrt());
            let t_stat = std_error.filter(|&se| se > 0.0).map(|se| estimate / se);
            let p_value = match (t_stat, &t_dist) {
                (Some(t), Some(dist)) => Some(2.0 * dist.sf(t.abs())),
                _ => None,
            };
            Coefficient { name: name.clone(), estimate, std_error, t_stat, p_value }
        })
        .collect();

    Ok(Fit { response: design.response.clone(), coefficients, rows: n, df_resid, r_squared, residual_variance })
}
