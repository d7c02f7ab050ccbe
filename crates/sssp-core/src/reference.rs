//! Sequential priority-queue SSSP, used both as a standalone solver
//! (`-t 0` in the CLI) and as the oracle the parallel solver is checked
//! against.
//!
//! Grounded directly on `graph_app`'s `dijkstra` (a `BinaryHeap` of
//! `Reverse<(distance, node)>` with a stale-entry skip via snapshot
//! comparison), generalized from `f32`/`FloatOrd` to the plain `u64`
//! distances this engine uses, which need no total-order wrapper.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

use log::info;

use sssp_graph::control::SolveControl;
use sssp_graph::graph::Graph;
use sssp_graph::vertex::VertexId;

use crate::error::SolveError;
use crate::observer::{EdgeView, SolveObserver};
use crate::solution::{SolveOutput, INFINITE};

/// Runs the sequential reference solver from `source`.
///
/// Decrease-key is implemented by reinsertion rather than a handle-bearing
/// heap: an entry popped with a distance that no longer matches the
/// vertex's current tentative distance is a stale leftover from an earlier
/// reinsertion and is simply skipped.
pub fn solve_reference(
    graph: &Graph,
    source: VertexId,
    control: &SolveControl,
    observer: &dyn SolveObserver,
) -> Result<SolveOutput, SolveError> {
    let start = Instant::now();
    control.register();
    let result = run(graph, source, control, observer);
    control.unregister();
    info!("reference solver finished in {:?}", start.elapsed());
    result
}

fn run(
    graph: &Graph,
    source: VertexId,
    control: &SolveControl,
    observer: &dyn SolveObserver,
) -> Result<SolveOutput, SolveError> {
    let mut output = SolveOutput::new(graph.node_count());
    output.set(source, 0, None);

    let mut heap = BinaryHeap::new();
    heap.push(Reverse((0u64, source)));

    while let Some(Reverse((snapshot_distance, v))) = heap.pop() {
        control.hesitate()?;

        if snapshot_distance != output.distance(v) {
            // Stale entry left behind by an earlier decrease-key reinsertion.
            continue;
        }

        if let Some(edge) = output.predecessor(v) {
            graph.edge(edge).set_selected(true);
            observer.edge_selected(EdgeView::of(graph, edge), snapshot_distance);
        }

        for neighbor in graph.neighbors(v) {
            let alt = snapshot_distance.saturating_add(u64::from(neighbor.weight));
            if alt < output.distance(neighbor.target) {
                output.set(neighbor.target, alt, Some(neighbor.edge));
                heap.push(Reverse((alt, neighbor.target)));
            }
        }
    }

    debug_assert!(
        output
            .distances()
            .iter()
            .all(|&d| d == INFINITE || d < INFINITE),
        "reference solver left a non-canonical distance"
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use crate::testkit::{chain_graph, disconnected_pair_graph, single_vertex_graph, star_graph, triangle_graph};

    #[test]
    fn chain_scenario() {
        let graph = chain_graph();
        let control = SolveControl::new();
        let out = solve_reference(&graph, VertexId::new(0), &control, &NoopObserver).unwrap();
        assert_eq!(out.distances(), &[0, 1, 3, 6]);
    }

    #[test]
    fn star_scenario() {
        let graph = star_graph();
        let control = SolveControl::new();
        let out = solve_reference(&graph, VertexId::new(0), &control, &NoopObserver).unwrap();
        assert_eq!(out.distances(), &[0, 2, 5, 7, 1]);
    }

    #[test]
    fn triangle_scenario_prefers_light_edge_relaxation() {
        let graph = triangle_graph();
        let control = SolveControl::new();
        let out = solve_reference(&graph, VertexId::new(0), &control, &NoopObserver).unwrap();
        assert_eq!(out.distances(), &[0, 4, 3]);
    }

    #[test]
    fn single_vertex_has_zero_distance() {
        let graph = single_vertex_graph();
        let control = SolveControl::new();
        let out = solve_reference(&graph, VertexId::new(0), &control, &NoopObserver).unwrap();
        assert_eq!(out.distances(), &[0]);
    }

    #[test]
    fn unreachable_vertex_stays_infinite() {
        let graph = disconnected_pair_graph();
        let control = SolveControl::new();
        let out = solve_reference(&graph, VertexId::new(0), &control, &NoopObserver).unwrap();
        assert_eq!(out.distance(VertexId::new(0)), 0);
        assert_eq!(out.distance(VertexId::new(1)), INFINITE);
    }

    #[test]
    fn cancellation_unwinds_cleanly() {
        let graph = chain_graph();
        let control = SolveControl::new();
        control.cancel();
        let err = solve_reference(&graph, VertexId::new(0), &control, &NoopObserver).unwrap_err();
        assert_eq!(err, SolveError::Cancelled);
    }
}
