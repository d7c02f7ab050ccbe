use std::sync::atomic::{AtomicBool, Ordering};

use crate::vertex::VertexId;

/// An undirected, positively-weighted edge between two vertices.
///
/// `selected` tracks whether this edge is currently some vertex's shortest-path
/// predecessor; it is the only mutable field, flipped by the solver at the
/// point a predecessor is replaced. Backed by an `AtomicBool` rather than a
/// `Cell` because edges live in a `Graph` shared across solver threads via
/// `Arc`, which requires `Sync`.
#[derive(Debug)]
pub struct Edge {
    pub a: VertexId,
    pub b: VertexId,
    pub weight: u32,
    selected: AtomicBool,
}

impl Edge {
    /// Builds an edge. Callers (the generator, and tests/callers building
    /// small graphs by hand) are responsible for upholding the usual
    /// invariants: no self-loops, weight `> 0`.
    #[must_use]
    pub fn new(a: VertexId, b: VertexId, weight: u32) -> Self {
        Self {
            a,
            b,
            weight,
            selected: AtomicBool::new(false),
        }
    }

    /// The endpoint of this edge that is not `from`.
    ///
    /// # Panics
    ///
    /// Panics if `from` is not one of this edge's endpoints.
    #[must_use]
    pub fn other(&self, from: VertexId) -> VertexId {
        if from == self.a {
            self.b
        } else if from == self.b {
            self.a
        } else {
            panic!("{from:?} is not an endpoint of {self:?}");
        }
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected.load(Ordering::Relaxed)
    }

    pub fn set_selected(&self, selected: bool) {
        self.selected.store(selected, Ordering::Relaxed);
    }
}
