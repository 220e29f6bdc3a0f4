//! Random instance generation and writers for the text formats read by
//! [`crate::parser`].
//!
//! Negative weights are only produced on acyclic graphs, so generated
//! instances never contain a negative cycle.

use crate::matching::BipartiteGraph;
use crate::max_flow::{Capacity, FlowNetwork};
use crate::{Graph, GraphError, Weight};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::io::{self, Write};

/// Shape of a random weighted graph
#[derive(Debug, Clone)]
pub struct GraphParams {
    pub vertices: usize,
    /// Probability of each candidate edge (self-loops excluded)
    pub density: f64,
    pub min_weight: Weight,
    pub max_weight: Weight,
    pub directed: bool,
    /// Only emit edges consistent with a hidden topological order
    pub acyclic: bool,
}

impl Default for GraphParams {
    fn default() -> Self {
        GraphParams {
            vertices: 8,
            density: 0.3,
            min_weight: 1,
            max_weight: 20,
            directed: true,
            acyclic: false,
        }
    }
}

/// Seeded RNG, or one seeded from entropy when no seed is given
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::thread_rng().gen()),
    }
}

/// Uniform random permutation of 0..n (Fisher-Yates)
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=i);
        pool.swap(i, j);
    }
    pool
}

pub fn random_graph<R: Rng>(params: &GraphParams, rng: &mut R) -> Result<Graph, GraphError> {
    let n = params.vertices;
    let (lo, hi) = if params.min_weight <= params.max_weight {
        (params.min_weight, params.max_weight)
    } else {
        (params.max_weight, params.min_weight)
    };
    // Position in the hidden order; arcs only run forward when acyclic
    let order = random_permutation(n, rng);
    let one_way = params.acyclic || !params.directed;

    let mut graph = Graph::new(n, params.directed);
    for i in 0..n {
        for j in 0..n {
            if i == j || (one_way && j < i) {
                continue;
            }
            if rng.gen::<f64>() < params.density {
                let weight = rng.gen_range(lo..=hi);
                graph.add_edge(order[i], order[j], weight)?;
            }
        }
    }
    Ok(graph)
}

/// Random capacity matrix without self-loops
pub fn random_capacity_matrix<R: Rng>(
    n: usize,
    density: f64,
    max_capacity: Capacity,
    rng: &mut R,
) -> Vec<Vec<Capacity>> {
    let mut matrix = vec![vec![0; n]; n];
    for (i, row) in matrix.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            if i == j {
                continue;
            }
            if rng.gen::<f64>() < density {
                *val = rng.gen_range(1..=max_capacity.max(1));
            }
        }
    }
    matrix
}

pub fn random_bipartite<R: Rng>(
    left: usize,
    right: usize,
    density: f64,
    rng: &mut R,
) -> BipartiteGraph {
    let mut graph = BipartiteGraph::new(left, right);
    for list in graph.adj.iter_mut() {
        for r in 0..right {
            if rng.gen::<f64>() < density {
                list.push(r);
            }
        }
    }
    graph
}

/// Write a graph in the `directed <n>` / `u v w` format
pub fn write_graph<W: Write>(writer: &mut W, graph: &Graph) -> io::Result<()> {
    let kind = if graph.is_directed() {
        "directed"
    } else {
        "undirected"
    };
    writeln!(writer, "{} {}", kind, graph.num_vertices())?;
    for edge in graph.edges() {
        writeln!(
            writer,
            "{} {} {}",
            edge.source, edge.destination, edge.weight
        )?;
    }
    Ok(())
}

/// Write adjacency matrix as space-separated rows
pub fn write_matrix<W: Write>(writer: &mut W, matrix: &[Vec<Capacity>]) -> io::Result<()> {
    for row in matrix {
        for (i, val) in row.iter().enumerate() {
            if i > 0 {
                write!(writer, " ")?;
            }
            write!(writer, "{}", val)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn write_flow_network<W: Write>(writer: &mut W, network: &FlowNetwork) -> io::Result<()> {
    writeln!(writer, "{}", network.num_vertices())?;
    write_matrix(writer, &network.capacity)
}

pub fn write_bipartite<W: Write>(writer: &mut W, graph: &BipartiteGraph) -> io::Result<()> {
    writeln!(writer, "bipartite {} {}", graph.left, graph.right)?;
    for (l, list) in graph.adj.iter().enumerate() {
        for r in list {
            writeln!(writer, "{} {}", l, r)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn test_same_seed_same_graph() {
        let params = GraphParams::default();
        let a = random_graph(&params, &mut rng_from_seed(Some(7))).unwrap();
        let b = random_graph(&params, &mut rng_from_seed(Some(7))).unwrap();
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn test_weights_within_range() {
        let params = GraphParams {
            vertices: 12,
            density: 0.5,
            min_weight: -3,
            max_weight: 4,
            acyclic: true,
            ..GraphParams::default()
        };
        let g = random_graph(&params, &mut rng_from_seed(Some(1))).unwrap();
        assert!(g.edges().iter().all(|e| (-3..=4).contains(&e.weight)));
        assert!(g.edges().iter().all(|e| e.source != e.destination));
    }

    #[test]
    fn test_permutation_is_bijection() {
        let mut p = random_permutation(10, &mut rng_from_seed(Some(3)));
        p.sort_unstable();
        assert_eq!(p, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_written_graph_parses_back() {
        let params = GraphParams {
            directed: false,
            ..GraphParams::default()
        };
        let g = random_graph(&params, &mut rng_from_seed(Some(11))).unwrap();
        let mut buf = Vec::new();
        write_graph(&mut buf, &g).unwrap();
        let parsed = parser::parse_graph_str(std::str::from_utf8(&buf).unwrap()).unwrap();
        assert_eq!(parsed.edges(), g.edges());
        assert!(!parsed.is_directed());
    }

    #[test]
    fn test_capacity_matrix_has_empty_diagonal() {
        let m = random_capacity_matrix(6, 1.0, 9, &mut rng_from_seed(Some(5)));
        for (i, row) in m.iter().enumerate() {
            assert_eq!(row[i], 0);
            assert!(row.iter().all(|&c| c <= 9));
        }
    }

    #[test]
    fn test_written_flow_network_parses_back() {
        let matrix = random_capacity_matrix(7, 0.5, 20, &mut rng_from_seed(Some(9)));
        let network = FlowNetwork::from_capacity_matrix(matrix).unwrap();
        let mut buf = Vec::new();
        write_flow_network(&mut buf, &network).unwrap();
        let parsed = parser::parse_flow_network_str(std::str::from_utf8(&buf).unwrap()).unwrap();
        assert_eq!(parsed, network);
    }

    #[test]
    fn test_written_bipartite_parses_back() {
        let g = random_bipartite(4, 5, 0.4, &mut rng_from_seed(Some(2)));
        let mut buf = Vec::new();
        write_bipartite(&mut buf, &g).unwrap();
        let parsed = parser::parse_bipartite_str(std::str::from_utf8(&buf).unwrap()).unwrap();
        assert_eq!(parsed, g);
    }
}
