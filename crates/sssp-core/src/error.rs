use thiserror::Error;

use sssp_graph::control::Cancelled;

/// Error taxonomy for a solve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The caller requested cancellation mid-solve.
    #[error("solve was cancelled")]
    Cancelled,

    /// A bucket/commit invariant did not hold.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A worker thread terminated abnormally.
    #[error("a worker thread panicked")]
    WorkerPanicked,

    /// A participant failed to arrive at a barrier rendezvous (the barrier
    /// was poisoned by another participant's failure).
    #[error("barrier desynchronized: a participant did not arrive")]
    BarrierDesync,
}

impl From<Cancelled> for SolveError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}
