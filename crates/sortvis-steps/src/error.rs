//! Error types for sortvis-steps.

use thiserror::Error;

/// An algorithm name that matches no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm: {0}")]
pub struct ParseAlgorithmError(pub String);
