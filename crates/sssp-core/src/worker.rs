//! Per-thread light/heavy relaxation logic for the parallel delta-stepping
//! solver.
//!
//! A worker owns the vertices with `v.id % W == worker_id`, a heavy-edge map
//! recording deferred heavy relaxations for the vertices it has settled in
//! the current bucket, and one pending-update slot the coordinator drains at
//! commit. Bucket cells themselves live only on the coordinator
//! (`crate::bucket`); a worker only ever sees the batch the coordinator
//! hands it for the bucket currently being processed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};

use sssp_graph::control::SolveControl;
use sssp_graph::graph::Graph;
use sssp_graph::vertex::{EdgeId, VertexId};

use crate::barrier::PoisonableBarrier;
use crate::coordinator::PhaseSignal;
use crate::error::SolveError;
use crate::message::Message;

/// A relaxation collected during a phase, awaiting the coordinator's commit:
/// either produced locally (the target vertex is owned by this worker) or
/// drained from another worker's outbound channel.
#[derive(Copy, Clone, Debug)]
pub(crate) struct PendingUpdate {
    pub(crate) edge: EdgeId,
    pub(crate) target: VertexId,
    pub(crate) distance: u64,
    pub(crate) target_bucket: usize,
}

pub(crate) struct Worker {
    id: usize,
    workers: usize,
    delta: u64,
    nb: usize,
    graph: Arc<Graph>,
    control: Arc<SolveControl>,
    barrier: Arc<PoisonableBarrier>,
    phase: Arc<PhaseSignal>,
    shadow: Arc<Vec<AtomicU64>>,
    batch: Arc<Mutex<Vec<VertexId>>>,
    pending: Arc<Mutex<Vec<PendingUpdate>>>,
    senders: Vec<mpsc::Sender<Message>>,
    inbox: mpsc::Receiver<Message>,
    heavy: HashMap<VertexId, Vec<EdgeId>>,
}

impl Worker {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: usize,
        workers: usize,
        delta: u64,
        nb: usize,
        graph: Arc<Graph>,
        control: Arc<SolveControl>,
        barrier: Arc<PoisonableBarrier>,
        phase: Arc<PhaseSignal>,
        shadow: Arc<Vec<AtomicU64>>,
        batch: Arc<Mutex<Vec<VertexId>>>,
        pending: Arc<Mutex<Vec<PendingUpdate>>>,
        senders: Vec<mpsc::Sender<Message>>,
        inbox: mpsc::Receiver<Message>,
    ) -> Self {
        Self {
            id,
            workers,
            delta,
            nb,
            graph,
            control,
            barrier,
            phase,
            shadow,
            batch,
            pending,
            senders,
            inbox,
            heavy: HashMap::new(),
        }
    }

    /// Runs this worker's side of the phase protocol until the coordinator
    /// signals termination or an error unwinds the solve.
    ///
    /// On error, poisons the shared barrier before returning so a peer
    /// blocked in `barrier.wait()` (including the coordinator) is released
    /// with `SolveError::BarrierDesync` rather than hanging forever.
    pub(crate) fn run(mut self) -> Result<(), SolveError> {
        self.control.register();
        let result = self.run_inner();
        if result.is_err() {
            self.barrier.poison();
        }
        self.control.unregister();
        result
    }

    fn run_inner(&mut self) -> Result<(), SolveError> {
        loop {
            self.barrier.wait()?; // step 2 / top of outer loop
            if self.phase.is_terminate() {
                return Ok(());
            }
            self.control.check_pause_or_cancel()?;

            self.heavy.clear();

            loop {
                self.relax_light()?;
                self.barrier.wait()?; // 3b: relaxation collection complete
                self.drain_inbox();
                self.barrier.wait()?; // 3d: inbound queues drained
                self.barrier.wait()?; // 3f: commit applied between d and f
                if !self.phase.repeat_light() {
                    break;
                }
            }

            self.relax_heavy()?;
            self.barrier.wait()?; // 4b
            self.drain_inbox();
            self.barrier.wait()?; // 4d
            self.barrier.wait()?; // 4f: proceed to top of outer loop
        }
    }

    fn take_batch(&self) -> Vec<VertexId> {
        std::mem::take(&mut *self.batch.lock().unwrap_or_else(|p| p.into_inner()))
    }

    fn push_pending(&self, update: PendingUpdate) {
        self.pending
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(update);
    }

    fn drain_inbox(&self) {
        while let Ok(msg) = self.inbox.try_recv() {
            self.push_pending(PendingUpdate {
                edge: msg.edge,
                target: msg.target_vertex,
                distance: msg.proposed_distance,
                target_bucket: msg.target_bucket,
            });
        }
    }

    fn shadow_distance(&self, v: VertexId) -> u64 {
        self.shadow[v.index()].load(Ordering::SeqCst)
    }

    fn target_bucket(&self, distance: u64) -> usize {
        ((distance / self.delta) % self.nb as u64) as usize
    }

    fn route_relaxation(&self, edge: EdgeId, target: VertexId, alt: u64) {
        let owner = target.index() % self.workers;
        let bucket = self.target_bucket(alt);
        if owner == self.id {
            self.push_pending(PendingUpdate {
                edge,
                target,
                distance: alt,
                target_bucket: bucket,
            });
        } else {
            let message = Message {
                edge,
                target_vertex: target,
                proposed_distance: alt,
                target_worker: owner,
                target_bucket: bucket,
            };
            // A dropped receiver means that worker already exited (e.g. the
            // solve is unwinding from cancellation); not a protocol error.
            let _ = self.senders[owner].send(message);
        }
    }

    fn relax_light(&mut self) -> Result<(), SolveError> {
        let batch = self.take_batch();
        for v in batch {
            self.control.check_pause_or_cancel()?;
            let base = self.shadow_distance(v);
            let mut heavy_edges = Vec::new();
            for neighbor in self.graph.neighbors(v) {
                if u64::from(neighbor.weight) <= self.delta {
                    let alt = base.saturating_add(u64::from(neighbor.weight));
                    if alt < self.shadow_distance(neighbor.target) {
                        self.route_relaxation(neighbor.edge, neighbor.target, alt);
                    }
                } else {
                    heavy_edges.push(neighbor.edge);
                }
            }
            // A vertex can be revisited within the same bucket (re-inserted
            // by a light-edge relaxation during this same outer iteration);
            // overwrite rather than accumulate so its heavy edges are
            // recorded once, not once per visit.
            if !heavy_edges.is_empty() {
                self.heavy.insert(v, heavy_edges);
            }
        }
        Ok(())
    }

    fn relax_heavy(&mut self) -> Result<(), SolveError> {
        for (&v, edges) in &self.heavy {
            self.control.check_pause_or_cancel()?;
            let base = self.shadow_distance(v);
            for &edge_id in edges {
                let edge = self.graph.edge(edge_id);
                let target = edge.other(v);
                let alt = base.saturating_add(u64::from(edge.weight));
                if alt < self.shadow_distance(target) {
                    self.route_relaxation(edge_id, target, alt);
                }
            }
        }
        Ok(())
    }
}
