//! Inter-worker relaxation message: a single-use proposal to improve one
//! vertex's tentative distance, addressed to the worker that owns the
//! target vertex (`target_vertex.id % W`).

use sssp_graph::vertex::{EdgeId, VertexId};

#[derive(Copy, Clone, Debug)]
pub struct Message {
    pub edge: EdgeId,
    pub target_vertex: VertexId,
    pub proposed_distance: u64,
    pub target_worker: usize,
    pub target_bucket: usize,
}
