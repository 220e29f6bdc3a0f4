use serde::Serialize;

pub use error::{GraphError, InputError};

/// Vertex label, dense in `[0, n)`
pub type Vertex = usize;

/// Edge weight; may be negative for Bellman-Ford and Johnson
pub type Weight = i64;

/// A single weighted edge as it was added to the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub source: Vertex,
    pub destination: Vertex,
    pub weight: Weight,
}

/// Represents a weighted directed or undirected graph with adjacency lists
#[derive(Debug, Clone)]
pub struct Graph {
    /// Number of vertices
    pub n: usize,
    /// Whether edges are one-way
    pub directed: bool,
    /// Edges in insertion order; an undirected edge appears once
    pub edges: Vec<Edge>,
    /// Adjacency lists: adj[u] = (neighbor, weight) pairs
    pub adj: Vec<Vec<(Vertex, Weight)>>,
}

impl Graph {
    pub fn new(n: usize, directed: bool) -> Self {
        Graph {
            n,
            directed,
            edges: Vec::new(),
            adj: vec![Vec::new(); n],
        }
    }

    /// Like [`Graph::new`], but an unallocatable vertex count is an error
    pub fn try_new(n: usize, directed: bool) -> Result<Self, GraphError> {
        let mut adj = Vec::new();
        adj.try_reserve_exact(n)
            .map_err(|_| GraphError::TooManyVertices(n))?;
        adj.resize_with(n, Vec::new);
        Ok(Graph {
            n,
            directed,
            edges: Vec::new(),
            adj,
        })
    }

    pub fn new_directed(n: usize) -> Self {
        Self::new(n, true)
    }

    pub fn new_undirected(n: usize) -> Self {
        Self::new(n, false)
    }

    pub fn from_edges<I>(n: usize, directed: bool, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (Vertex, Vertex, Weight)>,
    {
        let mut graph = Self::try_new(n, directed)?;
        for (u, v, w) in edges {
            graph.add_edge(u, v, w)?;
        }
        Ok(graph)
    }

    /// Add an edge; undirected graphs get the reverse arc as well
    pub fn add_edge(&mut self, u: Vertex, v: Vertex, weight: Weight) -> Result<(), GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        self.edges.push(Edge {
            source: u,
            destination: v,
            weight,
        });
        self.adj[u].push((v, weight));
        if !self.directed && u != v {
            self.adj[v].push((u, weight));
        }
        Ok(())
    }

    pub fn check_vertex(&self, v: Vertex) -> Result<(), GraphError> {
        if v < self.n {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex: v,
                vertices: self.n,
            })
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.n
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn neighbors(&self, u: Vertex) -> &[(Vertex, Weight)] {
        &self.adj[u]
    }

    /// Iterate over every arc (u, v, w); undirected edges yield both directions
    pub fn arcs(&self) -> impl Iterator<Item = (Vertex, Vertex, Weight)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(u, list)| list.iter().map(move |&(v, w)| (u, v, w)))
    }

    pub fn has_negative_weight(&self) -> bool {
        self.edges.iter().any(|e| e.weight < 0)
    }
}

// Module declarations
pub mod bellman_ford;
pub mod dijkstra;
pub mod error;
pub mod event;
pub mod generator;
pub mod johnson;
pub mod matching;
pub mod max_flow;
pub mod parser;
pub mod paths;
pub mod report;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_creation() {
        let g = Graph::new_directed(3);
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 0);
        assert!(g.neighbors(0).is_empty());
    }

    #[test]
    fn test_undirected_edge_appears_in_both_lists() {
        let mut g = Graph::new_undirected(2);
        g.add_edge(0, 1, 7).unwrap();
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.neighbors(0), &[(1, 7)]);
        assert_eq!(g.neighbors(1), &[(0, 7)]);
        assert_eq!(g.arcs().count(), 2);
    }

    #[test]
    fn test_add_edge_rejects_unknown_vertex() {
        let mut g = Graph::new_directed(2);
        let err = g.add_edge(0, 2, 1).unwrap_err();
        assert_eq!(
            err,
            GraphError::VertexOutOfRange {
                vertex: 2,
                vertices: 2
            }
        );
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn test_unallocatable_vertex_count_is_an_error() {
        let err = Graph::from_edges(usize::MAX, true, []).unwrap_err();
        assert_eq!(err, GraphError::TooManyVertices(usize::MAX));
    }

    #[test]
    fn test_parse_simple_graph() {
        let input = "directed 3\n0 1 4\n1 2 -2\n";
        let g = parser::parse_graph_str(input).unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert!(g.has_negative_weight());
    }

    #[test]
    fn test_shortest_path_on_line() {
        let g = Graph::from_edges(3, true, [(0, 1, 2), (1, 2, 3)]).unwrap();
        let paths = dijkstra::dijkstra(&g, 0).unwrap();
        assert_eq!(paths.distance(2), Some(5));
        assert_eq!(paths.path_to(2), Some(vec![0, 1, 2]));
    }
}
