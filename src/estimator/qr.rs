//! Least squares on top of nalgebra's Householder QR.
//!
//! No column pivoting: a column that is (numerically) a linear combination of the
//! columns before it shows up as a vanishing diagonal entry of `R`, which is exactly
//! the condition under which the least-squares solution stops being unique.
use nalgebra::{DMatrix, DVector};

/// A diagonal entry of `R` below this fraction of its column's original norm counts as zero.
pub const RANK_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone)]
pub struct QrDecomposition {
    /// `min(rows, cols) x cols`, upper triangular.
    r: DMatrix<f64>,
    /// `Q^T y`, length `min(rows, cols)`.
    qty: DVector<f64>,
    rank: usize,
}

impl QrDecomposition {
    /// Factorises `x`, carrying `y` along.
    pub fn factor(x: &DMatrix<f64>, y: &DVector<f64>) -> Self {
        let norms: Vec<f64> = x.column_iter().map(|c| c.norm()).collect();
        let qr = x.clone().qr();
        let qty = qr.q().tr_mul(y);
        let r = qr.r();

        let rank = (0..r.nrows().min(r.ncols()))
            .filter(|&k| norms[k] > 0.0 && r[(k, k)].abs() > RANK_TOLERANCE * norms[k])
            .count();

        Self { r, qty, rank }
    }

    pub fn rank(&self) -> usize { self.rank }

    pub fn is_full_rank(&self) -> bool { self.rank == self.r.ncols() }

    /// Solves `R beta = Q^T y`. `None` below full rank.
    pub fn solve(&self) -> Option<DVector<f64>> {
        if !self.is_full_rank() {
            return None;
        }
        self.r.solve_upper_triangular(&self.qty)
    }

    /// Diagonal of `(X^T X)^{-1} = R^{-1} R^{-T}`. `None` below full rank.
    pub fn unscaled_variances(&self) -> Option<Vec<f64>> {
        if !self.is_full_rank() {
            return None;
        }
        let p = self.r.ncols();
        let inv = self.r.solve_upper_triangular(&DMatrix::identity(p, p))?;
        Some(inv.row_iter().map(|row| row.norm_squared()).collect())
    }
}
