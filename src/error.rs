//! Crate-wide error type.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemError {
    /// The edge set does not describe a valid DAG (cycle, self loop, bad coefficient...).
    #[error("Structure error: {msg}")]
    Structure { msg: String },
    /// The design matrix has rank below its column count.
    #[error("Singular design matrix: rank {rank} < {} columns ({})", .columns.len(), .columns.join(", "))]
    SingularMatrix { rank: usize, columns: Vec<String> },
    /// Simulation overflowed: a column holds `inf` or `NaN`.
    #[error("Non-finite values in simulated column '{column}'")]
    NonFinite { column: String },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl SemError {
    pub fn structure(msg: impl Into<String>) -> Self {
        Self::Structure { msg: msg.into() }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SemError>;
