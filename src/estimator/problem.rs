use crate::compute::SampleTable;
use crate::error::{Result, SemError};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Name given to the implicit constant column.
pub const INTERCEPT: &str = "const";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitOptions {
    /// Prepend a column of ones to the design.
    #[serde(default = "default_intercept")]
    pub intercept: bool,
}

fn default_intercept() -> bool { true }

impl Default for FitOptions {
    fn default() -> Self { Self { intercept: true } }
}

impl FitOptions {
    pub fn without_intercept() -> Self { Self { intercept: false } }
}

/// A least-squares problem `y ~ X` assembled from a sample table.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    pub response: String,
    /// Names of the columns of `x`, in order.
    pub columns: Vec<String>,
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
}

impl DesignMatrix {
    pub fn build(table: &SampleTable, response: &str, predictors: &[&str], options: FitOptions) -> Result<Self> {
        if table.is_empty() {
            return Err(SemError::invalid("Cannot fit a regression on an empty table"));
        }
        if predictors.is_empty() && !options.intercept {
            return Err(SemError::invalid("Regression needs at least one predictor or an intercept"));
        }

        let y = DVector::from_column_slice(table.column(response)?);
        let rows = table.rows();

        // Column-major, one table column after another.
        let mut columns = Vec::with_capacity(predictors.len() + 1);
        let mut data = Vec::with_capacity((predictors.len() + 1) * rows);
        if options.intercept {
            columns.push(INTERCEPT.to_string());
            data.resize(rows, 1.0);
        }

        for &name in predictors {
            if name == response {
                return Err(SemError::invalid(format!("Response '{}' cannot also be a predictor", name)));
            }
            if columns.iter().any(|c| c == name) {
                return Err(SemError::invalid(format!("Predictor '{}' listed more than once", name)));
            }
            data.extend_from_slice(table.column(name)?);
            columns.push(name.to_string());
        }

        let x = DMatrix::from_vec(rows, columns.len(), data);
        Ok(Self { response: response.to_string(), columns, x, y })
    }

    pub fn rows(&self) -> usize { self.x.nrows() }

    pub fn cols(&self) -> usize { self.x.ncols() }
}
