//! Reference and parallel delta-stepping single-source shortest-paths
//! solvers over a [`sssp_graph::graph::Graph`].
//!
//! ```
//! use sssp_core::prelude::*;
//! use sssp_graph::prelude::*;
//!
//! let graph = generate(GeneratorConfig { n: 32, seed: 1, degree: 4, gamma: 0.5 }).unwrap();
//! let control = SolveControl::new();
//! let out = solve_reference(&graph, VertexId::new(0), &control, &NoopObserver).unwrap();
//! assert_eq!(out.distance(VertexId::new(0)), 0);
//! ```

pub mod barrier;
pub mod bucket;
pub mod coordinator;
pub mod error;
pub mod message;
pub mod observer;
pub mod prelude;
pub mod reference;
pub mod solution;
pub mod testkit;
mod worker;
