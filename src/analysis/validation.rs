//! Static checks run against a model description before any graph is built.
use crate::config::ModelSpec;
use std::collections::HashSet;
use std::fmt;

/// The specific category of a validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorType {
    EmptyName,
    DuplicateNode,
    SelfLoop,
    DuplicateEdge,
    NonFiniteCoefficient,
    InvalidNoise,
}

/// A structured error report from the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The node (or edge, rendered `a -> b`) where the problem was found.
    pub node_name: String,
    pub error_type: ValidationErrorType,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.node_name, self.message)
    }
}

/// Collects every local problem in `spec`. Acyclicity is a global property and is
/// checked later by the topological sort.
pub fn validate(spec: &ModelSpec) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut declared = HashSet::new();
    for node in &spec.nodes {
        if node.name.trim().is_empty() {
            errors.push(err("<unnamed>", ValidationErrorType::EmptyName, "Node name must not be empty".into()));
            continue;
        }
        if !declared.insert(node.name.as_str()) {
            errors.push(err(&node.name, ValidationErrorType::DuplicateNode, "Node declared more than once".into()));
        }
        let magnitude = node.noise.magnitude();
        if !magnitude.is_finite() || magnitude < 0.0 {
            errors.push(err(
                &node.name,
                ValidationErrorType::InvalidNoise,
                format!("Noise spread must be finite and non-negative, got {}", magnitude),
            ));
        }
    }

    let mut seen_edges = HashSet::new();
    for edge in &spec.edges {
        let label = format!("{} -> {}", edge.source, edge.target);
        if edge.source.trim().is_empty() || edge.target.trim().is_empty() {
            errors.push(err(&label, ValidationErrorType::EmptyName, "Edge endpoints must be named".into()));
            continue;
        }
        if edge.source == edge.target {
            errors.push(err(&label, ValidationErrorType::SelfLoop, "A variable cannot cause itself".into()));
        }
        if !seen_edges.insert((edge.source.as_str(), edge.target.as_str())) {
            errors.push(err(&label, ValidationErrorType::DuplicateEdge, "Edge listed more than once".into()));
        }
        if !edge.coefficient.is_finite() {
            errors.push(err(
                &label,
                ValidationErrorType::NonFiniteCoefficient,
                format!("Coefficient must be finite, got {}", edge.coefficient),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn err(name: &str, error_type: ValidationErrorType, message: String) -> ValidationError {
    ValidationError { node_name: name.to_string(), error_type, message }
}
