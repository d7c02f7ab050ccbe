//! Small hand-built graphs shared by this crate's unit tests and the
//! `tests/` integration scenarios. Not part of the public API surface
//! proper, but kept as a plain module (rather than behind `#[cfg(test)]`)
//! so both in-crate tests and `tests/*.rs` can reach it.
#![doc(hidden)]

use sssp_graph::edge::Edge;
use sssp_graph::graph::Graph;
use sssp_graph::vertex::{EdgeId, Vertex, VertexId};

fn path(n: usize) -> Vec<Vertex> {
    (0..n)
        .map(|i| Vertex::new(VertexId::new(i), i as u32, 0))
        .collect()
}

fn connect(vertices: &mut [Vertex], edges: &mut Vec<Edge>, a: usize, b: usize, weight: u32) {
    let id = EdgeId::new(edges.len());
    edges.push(Edge::new(VertexId::new(a), VertexId::new(b), weight));
    vertices[a].push_edge(id);
    vertices[b].push_edge(id);
}

/// `0 --1-- 1 --2-- 2 --3-- 3`
#[must_use]
pub fn chain_graph() -> Graph {
    let mut vertices = path(4);
    let mut edges = Vec::new();
    for (i, &w) in [1u32, 2, 3].iter().enumerate() {
        connect(&mut vertices, &mut edges, i, i + 1, w);
    }
    Graph::new(vertices, edges)
}

/// Source `0` with spokes to `1..=4` weighted `{2, 5, 7, 1}`.
#[must_use]
pub fn star_graph() -> Graph {
    let mut vertices = path(5);
    let mut edges = Vec::new();
    for (i, &w) in [2u32, 5, 7, 1].iter().enumerate() {
        connect(&mut vertices, &mut edges, 0, i + 1, w);
    }
    Graph::new(vertices, edges)
}

/// Triangle `{0, 1, 2}` with `(0,1)=10`, `(1,2)=1`, `(0,2)=3`.
#[must_use]
pub fn triangle_graph() -> Graph {
    let mut vertices = path(3);
    let mut edges = Vec::new();
    for (a, b, w) in [(0usize, 1usize, 10u32), (1, 2, 1), (0, 2, 3)] {
        connect(&mut vertices, &mut edges, a, b, w);
    }
    Graph::new(vertices, edges)
}

/// A single isolated vertex.
#[must_use]
pub fn single_vertex_graph() -> Graph {
    Graph::new(path(1), Vec::new())
}

/// Two vertices with no edge between them.
#[must_use]
pub fn disconnected_pair_graph() -> Graph {
    Graph::new(path(2), Vec::new())
}
