//! Vertex/edge model, deterministic geometric graph generator and the
//! cooperative suspend/cancel signal for the single-source shortest-paths
//! engine.
//!
//! The generator produces a reproducible undirected weighted graph from a
//! `(vertex count, seed, mean degree, geometric realism)` tuple:
//!
//! ```
//! use sssp_graph::prelude::*;
//!
//! let graph = generate(GeneratorConfig { n: 64, seed: 7, degree: 5, gamma: 0.5 })
//!     .expect("valid generator parameters");
//!
//! assert_eq!(graph.node_count(), 64);
//! ```

pub mod control;
pub mod edge;
pub mod error;
pub mod generator;
pub mod graph;
pub mod prelude;
pub mod vertex;
