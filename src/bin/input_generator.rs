use anyhow::{bail, Context, Result};
use clap::Parser;
use shortest_path_max_flow_toolkit::{
    generator::{
        random_bipartite, random_capacity_matrix, random_graph, rng_from_seed, write_bipartite,
        write_flow_network, write_graph, GraphParams,
    },
    max_flow::FlowNetwork,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Kind of instance to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Weighted,
    Flow,
    Bipartite,
}

impl std::str::FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weighted" | "graph" => Ok(Kind::Weighted),
            "flow" | "capacity" => Ok(Kind::Flow),
            "bipartite" | "matching" => Ok(Kind::Bipartite),
            _ => Err(format!(
                "Invalid kind: {}. Use 'weighted', 'flow' or 'bipartite'",
                s
            )),
        }
    }
}

/// Input Generator for shortest-path, max-flow and matching instances.
///
/// Weighted graphs are written as `directed <n>` (or `undirected <n>`) followed
/// by one `u v w` line per edge; flow networks as `<n>` followed by an n x n
/// capacity matrix; bipartite graphs as `bipartite <left> <right>` followed by
/// `l r` lines. Negative weights are only generated on acyclic graphs, so the
/// output never contains a negative cycle.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate random instances for the shortest-path / max-flow solver"
)]
struct Args {
    /// Instance kind: weighted, flow or bipartite
    #[arg(long, default_value = "weighted")]
    kind: Kind,

    /// Number of vertices (left side for bipartite instances)
    #[arg(long)]
    vertices: usize,

    /// Number of right vertices for bipartite instances. Default: same as --vertices
    #[arg(long)]
    right: Option<usize>,

    /// Probability of each candidate edge (self-loops excluded)
    #[arg(long, default_value_t = 0.30)]
    density: f64,

    /// Smallest edge weight (weighted) or ignored (flow, bipartite)
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    min_weight: i64,

    /// Largest edge weight, or largest capacity for flow instances
    #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
    max_weight: i64,

    /// Restrict edges to a hidden topological order (required for negative weights)
    #[arg(long, default_value_t = false)]
    acyclic: bool,

    /// Generate an undirected graph
    #[arg(long, default_value_t = false)]
    undirected: bool,

    /// Random seed (if omitted, uses entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Output file path to write the instance (mandatory)
    #[arg(long)]
    output: PathBuf,
}

fn validate(args: &Args) -> Result<()> {
    if !(0.0..=1.0).contains(&args.density) {
        bail!("density must be in [0,1]");
    }
    if args.min_weight > args.max_weight {
        bail!("min_weight must not exceed max_weight");
    }
    if args.kind == Kind::Weighted && args.min_weight < 0 {
        if args.undirected {
            bail!("negative weights on an undirected graph always form a negative cycle");
        }
        if !args.acyclic {
            bail!("negative weights require --acyclic so no negative cycle is generated");
        }
    }
    if args.kind == Kind::Flow && args.max_weight < 1 {
        bail!("max_weight must be positive for flow instances");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    validate(&args)?;

    let mut rng = rng_from_seed(args.seed);
    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);

    println!("Generated instance:");
    println!("  kind = {:?}", args.kind);
    println!("  density = {:.3}", args.density);
    if let Some(seed) = args.seed {
        println!("  seed = {}", seed);
    }

    match args.kind {
        Kind::Weighted => {
            let params = GraphParams {
                vertices: args.vertices,
                density: args.density,
                min_weight: args.min_weight,
                max_weight: args.max_weight,
                directed: !args.undirected,
                acyclic: args.acyclic,
            };
            let graph = random_graph(&params, &mut rng)?;
            println!(
                "  vertices = {}, edges = {}, weights in [{}, {}]",
                graph.num_vertices(),
                graph.num_edges(),
                args.min_weight,
                args.max_weight
            );
            write_graph(&mut writer, &graph)?;
        }
        Kind::Flow => {
            let matrix = random_capacity_matrix(
                args.vertices,
                args.density,
                args.max_weight.unsigned_abs(),
                &mut rng,
            );
            let network = FlowNetwork::from_capacity_matrix(matrix)?;
            let arcs = network
                .capacity
                .iter()
                .flat_map(|r| r.iter())
                .filter(|&&c| c > 0)
                .count();
            println!("  vertices = {}, arcs = {}", network.num_vertices(), arcs);
            write_flow_network(&mut writer, &network)?;
        }
        Kind::Bipartite => {
            let right = args.right.unwrap_or(args.vertices);
            let graph = random_bipartite(args.vertices, right, args.density, &mut rng);
            println!(
                "  left = {}, right = {}, edges = {}",
                graph.left,
                graph.right,
                graph.num_edges()
            );
            write_bipartite(&mut writer, &graph)?;
        }
    }

    println!("  output file: {:?}", args.output);

    // Flush explicitly
    writer.flush()?;

    Ok(())
}
