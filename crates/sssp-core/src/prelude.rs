//! Convenience re-export of the commonly used types in this crate.

pub use crate::coordinator::{solve_delta_stepping, DeltaSteppingConfig};
pub use crate::error::SolveError;
pub use crate::observer::{EdgeView, LoggingObserver, NoopObserver, SolveObserver};
pub use crate::reference::solve_reference;
pub use crate::solution::{SolveOutput, INFINITE};
