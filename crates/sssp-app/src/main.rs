//! Command-line driver for the single-source shortest-paths engine.
//!
//! This binary is the "external collaborator" the core is deliberately
//! agnostic of: argument parsing, wiring an animation/pause surface, and
//! printing results all live here rather than in `sssp-core`.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use log::info;

use sssp_core::coordinator::{solve_delta_stepping, DeltaSteppingConfig};
use sssp_core::observer::{LoggingObserver, NoopObserver, SolveObserver};
use sssp_core::reference::solve_reference;
use sssp_graph::control::SolveControl;
use sssp_graph::generator::{generate, GeneratorConfig};
use sssp_graph::vertex::VertexId;

/// Single-source shortest paths over a generated geometric graph.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    generator: GeneratorConfig,

    #[command(flatten)]
    delta_stepping: DeltaSteppingConfig,

    /// Animation mode, `0..=3`. Accepted and validated but not acted upon:
    /// the animation surface itself is an external collaborator this crate
    /// does not implement.
    #[arg(short = 'a', long = "animation", default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
    animation: u8,

    /// Log each edge selection/unselection at trace level as it commits.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace")).init();
    } else {
        env_logger::init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "generating graph: n={} degree={} gamma={} seed={}",
        cli.generator.n, cli.generator.degree, cli.generator.gamma, cli.generator.seed
    );
    let graph = generate(cli.generator)?;

    let observer: Arc<dyn SolveObserver> = if cli.verbose {
        Arc::new(LoggingObserver)
    } else {
        Arc::new(NoopObserver)
    };

    let start = Instant::now();
    let distances = if cli.delta_stepping.workers == 0 {
        let control = SolveControl::new();
        solve_reference(&graph, VertexId::new(0), &control, observer.as_ref())?
            .distances()
            .to_vec()
    } else {
        let control = Arc::new(SolveControl::new());
        // DeltaSteppingConfig.degree has no CLI flag of its own; it shares
        // the generator's --degree so the grid and the bucket width agree.
        cli.delta_stepping.degree = cli.generator.degree;
        solve_delta_stepping(
            Arc::new(graph),
            VertexId::new(0),
            cli.delta_stepping,
            control,
            observer,
        )?
        .distances()
        .to_vec()
    };
    let elapsed = start.elapsed();

    for (id, distance) in distances.iter().enumerate() {
        println!("{id}\t{distance}");
    }
    println!("elapsed: {elapsed:?}");

    Ok(())
}
