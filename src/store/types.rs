use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self { Self(idx as u32) }
}

/// The exogenous disturbance attached to a single node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoiseSpec {
    /// Zero-mean normal with standard deviation `scale`.
    Gaussian { scale: f64 },
    /// Uniform on `[-half_width, half_width)`.
    Uniform { half_width: f64 },
}

impl NoiseSpec {
    pub fn standard() -> Self { NoiseSpec::Gaussian { scale: 1.0 } }

    pub fn gaussian(scale: f64) -> Self { NoiseSpec::Gaussian { scale } }

    /// The spread parameter, whichever distribution it belongs to.
    pub fn magnitude(&self) -> f64 {
        match *self {
            NoiseSpec::Gaussian { scale } => scale,
            NoiseSpec::Uniform { half_width } => half_width,
        }
    }

    /// Population variance of one draw.
    pub fn variance(&self) -> f64 {
        match *self {
            NoiseSpec::Gaussian { scale } => scale * scale,
            NoiseSpec::Uniform { half_width } => half_width * half_width / 3.0,
        }
    }
}

impl Default for NoiseSpec {
    fn default() -> Self { Self::standard() }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    pub name: String,
    #[serde(default)]
    pub noise: NoiseSpec,
}

/// A directed, coefficient-weighted dependency `source -> target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
    pub coefficient: f64,
}

impl EdgeSpec {
    pub fn new(source: impl Into<String>, target: impl Into<String>, coefficient: f64) -> Self {
        Self { source: source.into(), target: target.into(), coefficient }
    }
}

impl From<(&str, &str, f64)> for EdgeSpec {
    fn from((source, target, coefficient): (&str, &str, f64)) -> Self {
        Self::new(source, target, coefficient)
    }
}
