//! Convenience re-export of the commonly used types in this crate.

pub use crate::control::{Cancelled, SolveControl};
pub use crate::edge::Edge;
pub use crate::error::GraphError;
pub use crate::generator::{generate, GeneratorConfig};
pub use crate::graph::{Graph, Neighbor};
pub use crate::vertex::{EdgeId, Vertex, VertexId, MAX_COORD};
