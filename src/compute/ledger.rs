//! ledger.rs
//! The sample table: one contiguous column per variable.

use crate::error::{Result, SemError};
use std::collections::HashMap;

/// Simulated draws, stored column-major.
///
/// Column `c` occupies `data[c * rows .. (c + 1) * rows]`. A table is never mutated
/// once handed out; `with_column` produces an extended copy instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    names: Vec<String>,
    index: HashMap<String, usize>,
    rows: usize,
    data: Vec<f64>,
}

impl SampleTable {
    /// Allocates a zeroed table. Used by the engine before it writes each column.
    pub(crate) fn zeroed(names: Vec<String>, rows: usize) -> Self {
        let index = names.iter().enumerate().map(|(i, n)| (n.clone(), i)).collect();
        let data = vec![0.0; names.len() * rows];
        Self { names, index, rows, data }
    }

    /// Builds a table from named columns of equal length.
    pub fn from_columns<S: Into<String>>(columns: impl IntoIterator<Item = (S, Vec<f64>)>) -> Result<Self> {
        let mut names = Vec::new();
        let mut data = Vec::new();
        let mut rows = None;

        for (name, values) in columns {
            let name = name.into();
            match rows {
                None => rows = Some(values.len()),
                Some(r) if r != values.len() => {
                    return Err(SemError::invalid(format!(
                        "Column '{}' has {} rows, expected {}",
                        name,
                        values.len(),
                        r
                    )))
                }
                _ => {}
            }
            if names.contains(&name) {
                return Err(SemError::invalid(format!("Duplicate column '{}'", name)));
            }
            names.push(name);
            data.extend(values);
        }

        let rows = rows.unwrap_or(0);
        let index = names.iter().enumerate().map(|(i, n)| (n.clone(), i)).collect();
        Ok(Self { names, index, rows, data })
    }

    pub fn rows(&self) -> usize { self.rows }

    pub fn column_count(&self) -> usize { self.names.len() }

    pub fn is_empty(&self) -> bool { self.rows == 0 }

    pub fn column_names(&self) -> &[String] { &self.names }

    pub fn contains(&self, name: &str) -> bool { self.index.contains_key(name) }

    pub fn column(&self, name: &str) -> Result<&[f64]> {
        let idx = *self
            .index
            .get(name)
            .ok_or_else(|| SemError::invalid(format!("Unknown column '{}'", name)))?;
        Ok(self.slot(idx))
    }

    /// One draw, as `(column, value)` pairs in column order.
    pub fn row(&self, i: usize) -> Option<Vec<(&str, f64)>> {
        if i >= self.rows {
            return None;
        }
        Some(self.names.iter().enumerate().map(|(c, n)| (n.as_str(), self.data[c * self.rows + i])).collect())
    }

    /// Returns a new table with `values` appended under `name`.
    pub fn with_column(&self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if self.contains(&name) {
            return Err(SemError::invalid(format!("Duplicate column '{}'", name)));
        }
        if values.len() != self.rows {
            return Err(SemError::invalid(format!(
                "Column '{}' has {} rows, expected {}",
                name,
                values.len(),
                self.rows
            )));
        }
        let mut next = self.clone();
        next.index.insert(name.clone(), next.names.len());
        next.names.push(name);
        next.data.extend(values);
        Ok(next)
    }

    pub fn mean(&self, name: &str) -> Result<f64> {
        let col = self.column(name)?;
        if col.is_empty() {
            return Err(SemError::invalid("Mean of an empty table"));
        }
        Ok(col.iter().sum::<f64>() / col.len() as f64)
    }

    /// Sample covariance (n - 1 denominator).
    pub fn covariance(&self, a: &str, b: &str) -> Result<f64> {
        let (xa, xb) = (self.column(a)?, self.column(b)?);
        if self.rows < 2 {
            return Err(SemError::invalid("Covariance needs at least two rows"));
        }
        let (ma, mb) = (self.mean(a)?, self.mean(b)?);
        let s: f64 = xa.iter().zip(xb).map(|(x, y)| (x - ma) * (y - mb)).sum();
        Ok(s / (self.rows - 1) as f64)
    }

    pub fn variance(&self, name: &str) -> Result<f64> { self.covariance(name, name) }

    // --- Engine access ---

    #[inline(always)]
    pub(crate) fn slot(&self, idx: usize) -> &[f64] {
        &self.data[idx * self.rows..(idx + 1) * self.rows]
    }

    #[inline(always)]
    pub(crate) fn slot_mut(&mut self, idx: usize) -> &mut [f64] {
        let rows = self.rows;
        &mut self.data[idx * rows..(idx + 1) * rows]
    }

    /// Borrows column `dest` mutably and column `src` immutably at the same time.
    pub(crate) fn slot_pair(&mut self, dest: usize, src: usize) -> (&mut [f64], &[f64]) {
        debug_assert_ne!(dest, src);
        let rows = self.rows;
        if dest < src {
            let (lo, hi) = self.data.split_at_mut(src * rows);
            (&mut lo[dest * rows..(dest + 1) * rows], &hi[..rows])
        } else {
            let (lo, hi) = self.data.split_at_mut(dest * rows);
            (&mut hi[..rows], &lo[src * rows..(src + 1) * rows])
        }
    }

    pub(crate) fn raw_data_len(&self) -> usize { self.data.len() }

    #[cfg(test)]
    pub(crate) fn raw_data_mut_vec(&mut self) -> &mut Vec<f64> { &mut self.data }
}
