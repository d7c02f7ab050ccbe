use sssp_graph::vertex::{EdgeId, VertexId};

/// Tentative distance used to represent "unreached".
pub const INFINITE: u64 = u64::MAX;

/// The result of a solve: one distance and predecessor edge per vertex,
/// indexed by [`VertexId::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutput {
    distances: Vec<u64>,
    predecessors: Vec<Option<EdgeId>>,
}

impl SolveOutput {
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            distances: vec![INFINITE; node_count],
            predecessors: vec![None; node_count],
        }
    }

    #[must_use]
    pub fn distance(&self, v: VertexId) -> u64 {
        self.distances[v.index()]
    }

    #[must_use]
    pub fn predecessor(&self, v: VertexId) -> Option<EdgeId> {
        self.predecessors[v.index()]
    }

    #[must_use]
    pub fn distances(&self) -> &[u64] {
        &self.distances
    }

    pub(crate) fn set(&mut self, v: VertexId, distance: u64, predecessor: Option<EdgeId>) {
        self.distances[v.index()] = distance;
        self.predecessors[v.index()] = predecessor;
    }
}
