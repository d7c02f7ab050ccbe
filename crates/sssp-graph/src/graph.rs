use crate::edge::Edge;
use crate::vertex::{EdgeId, Vertex, VertexId};

/// A neighbor reached across one edge: the edge id, the edge weight and the
/// vertex on the far end.
#[derive(Copy, Clone, Debug)]
pub struct Neighbor {
    pub edge: EdgeId,
    pub target: VertexId,
    pub weight: u32,
}

/// An undirected, weighted, geometric graph.
///
/// Adjacency and edge weights are immutable once built (see
/// [`crate::generator`]); the graph carries no solver state (no `dist`, no
/// predecessor) so it can be wrapped in an `Arc` and shared read-only across
/// every thread that participates in a solve.
#[derive(Debug)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Builds a graph directly from a vertex/edge arena.
    ///
    /// Used by [`crate::generator::generate`] and by tests/callers that
    /// construct small graphs by hand; callers are responsible for the usual
    /// invariants (no self-loops, no parallel edges, each edge present in
    /// both endpoints' adjacency lists).
    #[must_use]
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Self {
        Self { vertices, edges }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    #[must_use]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Iterates the neighbors of `id` by walking its adjacency list and
    /// resolving the other endpoint of each incident edge.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = Neighbor> + '_ {
        self.vertex(id).adjacency().iter().map(move |&edge_id| {
            let edge = self.edge(edge_id);
            Neighbor {
                edge: edge_id,
                target: edge.other(id),
                weight: edge.weight,
            }
        })
    }
}
