//! End-to-end scenarios exercising both solvers together, per the
//! equivalence and boundary properties a single-source shortest-paths
//! engine must satisfy: same inputs, same `W`, same distances.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use sssp_core::coordinator::{solve_delta_stepping, DeltaSteppingConfig};
use sssp_core::observer::NoopObserver;
use sssp_core::reference::solve_reference;
use sssp_core::testkit::{chain_graph, disconnected_pair_graph, single_vertex_graph, star_graph, triangle_graph};
use sssp_graph::control::SolveControl;
use sssp_graph::generator::{generate, GeneratorConfig};
use sssp_graph::vertex::VertexId;

fn parallel_distances(graph: Arc<sssp_graph::graph::Graph>, degree: u32, workers: usize) -> Vec<u64> {
    let control = Arc::new(SolveControl::new());
    let observer = Arc::new(NoopObserver);
    let config = DeltaSteppingConfig { workers, degree };
    solve_delta_stepping(graph, VertexId::new(0), config, control, observer)
        .unwrap()
        .distances()
        .to_vec()
}

fn reference_distances(graph: &sssp_graph::graph::Graph) -> Vec<u64> {
    let control = SolveControl::new();
    solve_reference(graph, VertexId::new(0), &control, &NoopObserver)
        .unwrap()
        .distances()
        .to_vec()
}

#[test]
fn chain_scenario_agrees_across_solvers() {
    let graph = Arc::new(chain_graph());
    let expected = vec![0, 1, 3, 6];
    assert_eq!(reference_distances(&graph), expected);
    for workers in [1, 2, 4] {
        assert_eq!(parallel_distances(Arc::clone(&graph), 2, workers), expected);
    }
}

#[test]
fn star_scenario_agrees_across_solvers() {
    let graph = Arc::new(star_graph());
    let expected = vec![0, 2, 5, 7, 1];
    assert_eq!(reference_distances(&graph), expected);
    for workers in [1, 2, 4] {
        assert_eq!(parallel_distances(Arc::clone(&graph), 3, workers), expected);
    }
}

#[test]
fn triangle_scenario_prefers_light_edge_relaxation() {
    let graph = Arc::new(triangle_graph());
    let expected = vec![0, 4, 3];
    assert_eq!(reference_distances(&graph), expected);
    for workers in [1, 2] {
        assert_eq!(parallel_distances(Arc::clone(&graph), 5, workers), expected);
    }
}

#[test]
fn single_vertex_graph_has_zero_distance() {
    let graph = Arc::new(single_vertex_graph());
    assert_eq!(reference_distances(&graph), vec![0]);
    assert_eq!(parallel_distances(Arc::clone(&graph), 4, 1), vec![0]);
}

#[test]
fn disconnected_graph_leaves_unreachable_vertices_infinite() {
    let graph = Arc::new(disconnected_pair_graph());
    let reference = reference_distances(&graph);
    assert_eq!(reference[0], 0);
    assert_eq!(reference[1], sssp_core::solution::INFINITE);

    let parallel = parallel_distances(Arc::clone(&graph), 4, 2);
    assert_eq!(parallel, reference);
}

#[test]
fn generated_graph_n50_agrees_between_reference_and_four_workers() {
    let graph = Arc::new(
        generate(GeneratorConfig {
            n: 50,
            seed: 0,
            degree: 5,
            gamma: 1.0,
        })
        .unwrap(),
    );
    let reference = reference_distances(&graph);
    let parallel = parallel_distances(Arc::clone(&graph), 5, 4);
    assert_eq!(parallel, reference);
}

#[test]
fn generated_graph_n100_agrees_across_worker_counts() {
    let graph = Arc::new(
        generate(GeneratorConfig {
            n: 100,
            seed: 42,
            degree: 4,
            gamma: 0.5,
        })
        .unwrap(),
    );
    let reference = reference_distances(&graph);
    for workers in [1, 2, 4, 8] {
        assert_eq!(
            parallel_distances(Arc::clone(&graph), 4, workers),
            reference,
            "worker count {workers} diverged from the reference solver"
        );
    }
}

#[test]
fn pure_uniform_and_pure_geometric_weighting_agree_between_solvers() {
    for gamma in [0.0, 1.0] {
        let graph = Arc::new(
            generate(GeneratorConfig {
                n: 60,
                seed: 17,
                degree: 4,
                gamma,
            })
            .unwrap(),
        );
        let reference = reference_distances(&graph);
        let parallel = parallel_distances(Arc::clone(&graph), 4, 4);
        assert_eq!(parallel, reference, "gamma={gamma} diverged");
    }
}

#[test]
fn cancellation_during_parallel_solve_returns_without_deadlock() {
    let graph = Arc::new(
        generate(GeneratorConfig {
            n: 2000,
            seed: 3,
            degree: 4,
            gamma: 0.5,
        })
        .unwrap(),
    );
    let control = Arc::new(SolveControl::new());
    let observer = Arc::new(NoopObserver);
    let config = DeltaSteppingConfig {
        workers: 4,
        degree: 4,
    };

    let handle = {
        let graph = Arc::clone(&graph);
        let control = Arc::clone(&control);
        thread::spawn(move || solve_delta_stepping(graph, VertexId::new(0), config, control, observer))
    };

    thread::sleep(Duration::from_millis(10));
    control.cancel();

    let result = handle.join().expect("solver thread must not panic");
    assert_eq!(result, Err(sssp_core::error::SolveError::Cancelled));
}
