//! The delta-stepping driver: bucket selection, the barrier-phased
//! light/heavy relaxation protocol, and the single-threaded commit of
//! collected updates.
//!
//! Grounded on the outer-loop/worker-pool shape of `graph_app`'s animated
//! solve runner, generalized from a single shared mutable graph to the
//! column-owned-by-coordinator bucket design described in `crate::bucket`.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Instant;

use log::info;

use sssp_graph::control::SolveControl;
use sssp_graph::graph::Graph;
use sssp_graph::vertex::{VertexId, MAX_COORD};

use crate::barrier::PoisonableBarrier;
use crate::bucket::BucketGrid;
use crate::error::SolveError;
use crate::message::Message;
use crate::observer::{EdgeView, SolveObserver};
use crate::solution::{SolveOutput, INFINITE};
use crate::worker::{PendingUpdate, Worker};

const TERMINATE: usize = usize::MAX;

/// Parameters for [`solve_delta_stepping`]. `delta`/`bucket_count` follow
/// directly from `degree`: `Δ = MAX_COORD / D`, `NB = 2·D`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct DeltaSteppingConfig {
    /// Number of worker threads, `W`. The coordinator adds one more thread
    /// of its own.
    #[cfg_attr(feature = "clap", arg(short = 't', long = "threads"))]
    pub workers: usize,

    /// Target mean degree `D`, shared with the generator; fixes `Δ` and the
    /// bucket count. Not its own CLI flag: `sssp-app` copies this from the
    /// flattened `GeneratorConfig` rather than parsing `--degree` twice.
    #[cfg_attr(feature = "clap", arg(skip))]
    pub degree: u32,
}

impl DeltaSteppingConfig {
    fn validate(self) -> Result<Self, SolveError> {
        if self.workers == 0 {
            return Err(SolveError::InvariantViolation(
                "delta-stepping requires at least one worker".to_string(),
            ));
        }
        if self.degree == 0 {
            return Err(SolveError::InvariantViolation(
                "degree must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }

    fn delta(self) -> u64 {
        u64::from(MAX_COORD) / u64::from(self.degree)
    }

    fn bucket_count(self) -> usize {
        2 * self.degree as usize
    }
}

/// Coordinator -> worker phase signalling. Written by the coordinator
/// strictly before the barrier call that publishes it, read by workers
/// strictly after the matching barrier call returns; the barrier's own
/// mutex/condvar rendezvous is what makes that write visible, so `SeqCst`
/// here is a belt-and-braces choice rather than a load-bearing one.
pub(crate) struct PhaseSignal {
    next_bucket: AtomicUsize,
    repeat_light: AtomicBool,
}

impl PhaseSignal {
    fn new() -> Self {
        Self {
            next_bucket: AtomicUsize::new(0),
            repeat_light: AtomicBool::new(false),
        }
    }

    fn set_next_bucket(&self, b: Option<usize>) {
        self.next_bucket.store(b.unwrap_or(TERMINATE), Ordering::SeqCst);
    }

    pub(crate) fn is_terminate(&self) -> bool {
        self.next_bucket.load(Ordering::SeqCst) == TERMINATE
    }

    fn set_repeat_light(&self, repeat: bool) {
        self.repeat_light.store(repeat, Ordering::SeqCst);
    }

    pub(crate) fn repeat_light(&self) -> bool {
        self.repeat_light.load(Ordering::SeqCst)
    }
}

/// Runs the parallel delta-stepping solver from `source` over `graph`.
///
/// Spawns `config.workers` OS threads plus acts as the coordinator itself,
/// drives the barrier-phased relaxation protocol to completion (or until
/// cancelled), and joins every worker before returning.
pub fn solve_delta_stepping(
    graph: Arc<Graph>,
    source: VertexId,
    config: DeltaSteppingConfig,
    control: Arc<SolveControl>,
    observer: Arc<dyn SolveObserver>,
) -> Result<SolveOutput, SolveError> {
    let config = config.validate()?;
    let start = Instant::now();
    control.register();
    let result = run(&graph, source, config, &control, observer.as_ref());
    control.unregister();
    info!(
        "delta-stepping solver ({} workers) finished in {:?}",
        config.workers,
        start.elapsed()
    );
    result
}

fn run(
    graph: &Arc<Graph>,
    source: VertexId,
    config: DeltaSteppingConfig,
    control: &Arc<SolveControl>,
    observer: &dyn SolveObserver,
) -> Result<SolveOutput, SolveError> {
    let n = graph.node_count();
    let delta = config.delta();
    let nb = config.bucket_count();
    let workers = config.workers;

    let barrier = Arc::new(PoisonableBarrier::new(workers + 1));
    let phase = Arc::new(PhaseSignal::new());
    let shadow: Arc<Vec<AtomicU64>> = Arc::new((0..n).map(|_| AtomicU64::new(INFINITE)).collect());
    shadow[source.index()].store(0, Ordering::SeqCst);

    let mut bucket_grid = BucketGrid::new(nb, workers, n);
    bucket_grid.insert(source, 0, source.index() % workers);

    let mut output = SolveOutput::new(n);
    output.set(source, 0, None);

    let batches: Vec<Arc<Mutex<Vec<VertexId>>>> = (0..workers)
        .map(|_| Arc::new(Mutex::new(Vec::new())))
        .collect();
    let pending: Vec<Arc<Mutex<Vec<PendingUpdate>>>> = (0..workers)
        .map(|_| Arc::new(Mutex::new(Vec::new())))
        .collect();

    let (senders, inboxes): (Vec<_>, Vec<_>) =
        (0..workers).map(|_| mpsc::channel::<Message>()).unzip();

    let mut handles = Vec::with_capacity(workers);
    for (id, inbox) in inboxes.into_iter().enumerate() {
        let worker = Worker::new(
            id,
            workers,
            delta,
            nb,
            Arc::clone(graph),
            Arc::clone(control),
            Arc::clone(&barrier),
            Arc::clone(&phase),
            Arc::clone(&shadow),
            Arc::clone(&batches[id]),
            Arc::clone(&pending[id]),
            senders.clone(),
            inbox,
        );
        handles.push(thread::spawn(move || worker.run()));
    }

    let mut current = 0usize;
    let drive_result = drive(
        graph,
        &mut bucket_grid,
        &mut output,
        &barrier,
        &phase,
        &shadow,
        &batches,
        &pending,
        &mut current,
        delta,
        nb,
        workers,
        observer,
        control,
    );

    if drive_result.is_err() {
        barrier.poison();
    }

    let mut errors = Vec::new();
    if let Err(e) = &drive_result {
        errors.push(e.clone());
    }
    for handle in handles {
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => errors.push(e),
            Err(_) => errors.push(SolveError::WorkerPanicked),
        }
    }

    match most_specific(errors) {
        Some(e) => Err(e),
        None => Ok(output),
    }
}

/// A worker that fails poisons the barrier to unstick everyone else, so a
/// participant blocked at that moment surfaces `BarrierDesync` even though
/// it was not the original cause. When several errors were collected for
/// one solve, report the one most useful to the caller rather than
/// whichever happened to be noticed first.
fn most_specific(errors: Vec<SolveError>) -> Option<SolveError> {
    fn priority(e: &SolveError) -> u8 {
        match e {
            SolveError::Cancelled => 0,
            SolveError::InvariantViolation(_) => 1,
            SolveError::WorkerPanicked => 2,
            SolveError::BarrierDesync => 3,
        }
    }
    errors.into_iter().min_by_key(|e| priority(e))
}

#[allow(clippy::too_many_arguments)]
fn drive(
    graph: &Arc<Graph>,
    bucket_grid: &mut BucketGrid,
    output: &mut SolveOutput,
    barrier: &PoisonableBarrier,
    phase: &PhaseSignal,
    shadow: &[AtomicU64],
    batches: &[Arc<Mutex<Vec<VertexId>>>],
    pending: &[Arc<Mutex<Vec<PendingUpdate>>>],
    current: &mut usize,
    delta: u64,
    nb: usize,
    workers: usize,
    observer: &dyn SolveObserver,
    control: &SolveControl,
) -> Result<(), SolveError> {
    loop {
        control.check_pause_or_cancel()?;

        let next = bucket_grid.next_nonempty_from(*current);
        phase.set_next_bucket(next);

        let Some(b) = next else {
            barrier.wait()?;
            return Ok(());
        };
        *current = b;

        fill_batches(bucket_grid, batches, b);
        barrier.wait()?; // step 2: release workers into bucket b

        loop {
            barrier.wait()?; // 3b: relaxation collection complete
            barrier.wait()?; // 3d: inbound queues drained

            commit(
                graph, bucket_grid, output, shadow, pending, delta, nb, workers, observer,
            )?;

            let repeat = !bucket_grid.is_bucket_empty(b);
            if repeat {
                fill_batches(bucket_grid, batches, b);
            }
            phase.set_repeat_light(repeat);
            barrier.wait()?; // 3f

            if !repeat {
                break;
            }
        }

        barrier.wait()?; // 4b: heavy relaxation collection complete
        barrier.wait()?; // 4d: inbound queues drained
        commit(
            graph, bucket_grid, output, shadow, pending, delta, nb, workers, observer,
        )?;
        barrier.wait()?; // 4f: proceed to top of outer loop
    }
}

fn fill_batches(bucket_grid: &mut BucketGrid, batches: &[Arc<Mutex<Vec<VertexId>>>], bucket: usize) {
    for (t, slot) in batches.iter().enumerate() {
        let cell = bucket_grid.take_cell(bucket, t);
        *slot.lock().unwrap_or_else(|p| p.into_inner()) = cell;
    }
}

#[allow(clippy::too_many_arguments)]
fn commit(
    graph: &Arc<Graph>,
    bucket_grid: &mut BucketGrid,
    output: &mut SolveOutput,
    shadow: &[AtomicU64],
    pending: &[Arc<Mutex<Vec<PendingUpdate>>>],
    delta: u64,
    nb: usize,
    workers: usize,
    observer: &dyn SolveObserver,
) -> Result<(), SolveError> {
    for slot in pending {
        let updates = std::mem::take(&mut *slot.lock().unwrap_or_else(|p| p.into_inner()));
        for update in updates {
            let current_t = shadow[update.target.index()].load(Ordering::SeqCst);
            if update.distance >= current_t {
                continue; // superseded by a better update already committed this phase
            }

            if let Some(previous_edge) = output.predecessor(update.target) {
                graph.edge(previous_edge).set_selected(false);
                observer.edge_unselected(EdgeView::of(graph, previous_edge));
            }

            shadow[update.target.index()].store(update.distance, Ordering::SeqCst);
            output.set(update.target, update.distance, Some(update.edge));

            let target_worker = update.target.index() % workers;
            let computed_bucket = ((update.distance / delta) % nb as u64) as usize;
            debug_assert_eq!(
                computed_bucket, update.target_bucket,
                "sender and commit disagree on the target bucket"
            );
            bucket_grid.insert(update.target, computed_bucket, target_worker);

            graph.edge(update.edge).set_selected(true);
            observer.edge_selected(EdgeView::of(graph, update.edge), update.distance);
        }
    }
    Ok(())
}
