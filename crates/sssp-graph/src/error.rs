use thiserror::Error;

/// Errors produced while constructing or validating a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex count must be at least 1")]
    EmptyGraph,

    #[error("target mean degree must be at least 1")]
    InvalidDegree,

    #[error("geometric realism factor must lie in [0, 1], got {0}")]
    InvalidGamma(f64),

    #[error("rejection sampling for distinct vertex coordinates did not converge after {0} draws")]
    CoordinateSamplingExhausted(u64),
}
