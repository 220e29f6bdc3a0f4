use anyhow::{Context, Result};
use clap::Parser;
use shortest_path_max_flow_toolkit::{
    bellman_ford::bellman_ford_with_progress,
    dijkstra::dijkstra_with_progress,
    event::{emit, spawn_ndjson_printer, SolverEvent},
    johnson::johnson_with_progress,
    matching::maximum_matching_with_progress,
    max_flow::max_flow_with_progress,
    parser::{read_bipartite_file, read_flow_network_file, read_graph_file},
    report, Graph, Vertex,
};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Sender};
use std::time::Instant;

/// Algorithm type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Algorithm {
    Dijkstra,
    BellmanFord,
    Johnson,
    MaxFlow,
    Matching,
}

impl std::str::FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "bellman-ford" | "bellman_ford" | "bf" => Ok(Algorithm::BellmanFord),
            "johnson" | "all-pairs" => Ok(Algorithm::Johnson),
            "max-flow" | "maxflow" | "ford-fulkerson" | "edmonds-karp" => Ok(Algorithm::MaxFlow),
            "matching" | "bipartite" => Ok(Algorithm::Matching),
            _ => Err(format!(
                "Invalid algorithm: {}. Use 'dijkstra', 'bellman-ford', 'johnson', 'max-flow' or 'matching'",
                s
            )),
        }
    }
}

impl Algorithm {
    fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::BellmanFord => "bellman-ford",
            Algorithm::Johnson => "johnson",
            Algorithm::MaxFlow => "max-flow",
            Algorithm::Matching => "matching",
        }
    }
}

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest-path and maximum-flow solver", long_about = None)]
struct Args {
    /// Algorithm: dijkstra, bellman-ford, johnson, max-flow or matching
    #[arg(short, long)]
    algorithm: Algorithm,

    /// Path to the input file (weighted graph, capacity matrix or bipartite graph)
    #[arg(short, long)]
    input: PathBuf,

    /// Source vertex for single-source algorithms and max-flow
    #[arg(short, long, default_value_t = 0)]
    source: Vertex,

    /// Sink vertex for max-flow. Default: the last vertex
    #[arg(short = 't', long)]
    sink: Option<Vertex>,

    /// Also write the report to this file
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Stream progress events as NDJSON on stderr
    #[arg(long, default_value_t = false)]
    emit_events: bool,
}

/// Run `f` between PhaseStarted and PhaseFinished events
fn phase<T>(name: &str, tx: Option<&Sender<SolverEvent>>, f: impl FnOnce() -> T) -> T {
    emit(
        tx,
        SolverEvent::PhaseStarted {
            name: name.to_string(),
        },
    );
    let start = Instant::now();
    let out = f();
    emit(
        tx,
        SolverEvent::PhaseFinished {
            name: name.to_string(),
            elapsed_ms: start.elapsed().as_millis(),
        },
    );
    out
}

fn describe_graph(graph: &Graph) {
    println!(
        "Graph: {} vertices, {} edges ({})",
        graph.num_vertices(),
        graph.num_edges(),
        if graph.is_directed() {
            "directed"
        } else {
            "undirected"
        }
    );
}

/// Load the input, run the chosen algorithm and render the report
fn run(args: &Args, tx: Option<&Sender<SolverEvent>>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let input = &args.input;
    let name = args.algorithm.name();

    match args.algorithm {
        Algorithm::Dijkstra | Algorithm::BellmanFord => {
            let graph = read_graph_file(input)
                .with_context(|| format!("loading graph from {}", input.display()))?;
            describe_graph(&graph);
            println!("Source vertex: {}", args.source);

            let paths = phase(name, tx, || {
                if args.algorithm == Algorithm::Dijkstra {
                    dijkstra_with_progress(&graph, args.source, tx)
                } else {
                    bellman_ford_with_progress(&graph, args.source, tx)
                }
            })
            .with_context(|| format!("running {} from vertex {}", name, args.source))?;
            report::write_shortest_paths(&mut out, &paths)?;
        }
        Algorithm::Johnson => {
            let graph = read_graph_file(input)
                .with_context(|| format!("loading graph from {}", input.display()))?;
            describe_graph(&graph);

            let all = phase(name, tx, || johnson_with_progress(&graph, tx))
                .context("running johnson")?;
            report::write_all_pairs(&mut out, &all)?;
        }
        Algorithm::MaxFlow => {
            let network = read_flow_network_file(input)
                .with_context(|| format!("loading capacity matrix from {}", input.display()))?;
            let sink = args
                .sink
                .unwrap_or_else(|| network.num_vertices().saturating_sub(1));
            println!("Flow network: {} vertices", network.num_vertices());
            println!("Source: {}  Sink: {}", args.source, sink);

            let result = phase(name, tx, || {
                max_flow_with_progress(&network, args.source, sink, tx)
            })
            .with_context(|| format!("computing max flow {} -> {}", args.source, sink))?;
            report::write_max_flow(&mut out, &network, args.source, sink, &result)?;
        }
        Algorithm::Matching => {
            let graph = read_bipartite_file(input)
                .with_context(|| format!("loading bipartite graph from {}", input.display()))?;
            println!(
                "Bipartite graph: {} left, {} right, {} edges",
                graph.left,
                graph.right,
                graph.num_edges()
            );

            let matching = phase(name, tx, || maximum_matching_with_progress(&graph, tx));
            report::write_matching(&mut out, &graph, &matching)?;
        }
    }

    Ok(out)
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Shortest-Path / Max-Flow Solver");
    println!("============================================================");
    println!("Algorithm: {}", args.algorithm.name());
    println!("Input: {}", args.input.display());
    println!();

    let (tx, printer) = if args.emit_events {
        let (tx, rx) = channel();
        (Some(tx), Some(spawn_ndjson_printer(rx)))
    } else {
        (None, None)
    };

    let start_time = Instant::now();
    let result = run(&args, tx.as_ref());
    let elapsed = start_time.elapsed();

    // Close the channel so the printer drains and exits
    drop(tx);
    if let Some(handle) = printer {
        handle.join().ok();
    }

    let report = result?;
    println!();
    print!("{}", String::from_utf8_lossy(&report));
    println!();
    println!("Computation time: {:.3} ms", elapsed.as_secs_f64() * 1000.0);

    if let Some(path) = &args.output_file {
        std::fs::write(path, &report)
            .with_context(|| format!("writing report to {}", path.display()))?;
        println!("Results saved to: {}", path.display());
    }

    Ok(())
}
