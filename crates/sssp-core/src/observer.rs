//! Animation/logging hooks invoked synchronously from the commit thread.
//! The animation surface itself is an external collaborator; this module
//! only defines the callback contract.

use log::trace;

use sssp_graph::graph::Graph;
use sssp_graph::vertex::EdgeId;

/// An edge as seen by an observer: both endpoints' coordinates, whether it
/// is currently some vertex's shortest-path predecessor, and its weight.
/// `selected` is read from the edge itself at call time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeView {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
    pub selected: bool,
    pub weight: u32,
}

impl EdgeView {
    #[must_use]
    pub fn of(graph: &Graph, edge: EdgeId) -> Self {
        let e = graph.edge(edge);
        let a = graph.vertex(e.a);
        let b = graph.vertex(e.b);
        Self {
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
            selected: e.is_selected(),
            weight: e.weight,
        }
    }
}

/// Callbacks invoked when a relaxation commits a new predecessor for a
/// vertex. Implementations must not assume these return quickly, but the
/// solver must not expose partially-committed bucket state to them — both
/// solvers only ever call these from their single commit thread, after a
/// distance/predecessor update has already landed.
pub trait SolveObserver: Send + Sync {
    /// A new predecessor edge was committed for some vertex, which now has
    /// tentative distance `new_distance`.
    fn edge_selected(&self, _edge: EdgeView, _new_distance: u64) {}

    /// An edge that was previously a vertex's predecessor has been
    /// superseded.
    fn edge_unselected(&self, _edge: EdgeView) {}
}

/// An observer that does nothing; the default when no animation/logging
/// surface is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SolveObserver for NoopObserver {}

/// An observer that logs selections at `trace` level, in the spirit of the
/// teacher's `log::info!("Computed SSSP in {:?}", ...)` instrumentation.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl SolveObserver for LoggingObserver {
    fn edge_selected(&self, edge: EdgeView, new_distance: u64) {
        trace!("select {edge:?} -> distance {new_distance}");
    }

    fn edge_unselected(&self, edge: EdgeView) {
        trace!("unselect {edge:?}");
    }
}
