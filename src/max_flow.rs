use crate::event::{emit, SolverEvent};
use crate::{Graph, GraphError, Vertex};
use itertools::Itertools;
use serde::Serialize;
use std::collections::{TryReserveError, VecDeque};
use std::sync::mpsc::Sender;

pub type Capacity = u64;

/// Directed flow network stored as a capacity matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNetwork {
    /// Number of vertices
    pub n: usize,
    /// capacity[u][v] = capacity of arc u -> v (0 when absent)
    pub capacity: Vec<Vec<Capacity>>,
}

impl FlowNetwork {
    pub fn new(n: usize) -> Self {
        FlowNetwork {
            n,
            capacity: vec![vec![0; n]; n],
        }
    }

    /// Like [`FlowNetwork::new`], but an unallocatable matrix is an error
    pub fn try_new(n: usize) -> Result<Self, GraphError> {
        let too_many = |_: TryReserveError| GraphError::TooManyVertices(n);
        n.checked_mul(n).ok_or(GraphError::TooManyVertices(n))?;

        let mut capacity = Vec::new();
        capacity.try_reserve_exact(n).map_err(too_many)?;
        for _ in 0..n {
            let mut row = Vec::new();
            row.try_reserve_exact(n).map_err(too_many)?;
            row.resize(n, 0);
            capacity.push(row);
        }
        Ok(FlowNetwork { n, capacity })
    }

    pub fn from_capacity_matrix(capacity: Vec<Vec<Capacity>>) -> Result<Self, GraphError> {
        let n = capacity.len();
        if let Some((row, r)) = capacity.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(GraphError::NonSquareMatrix {
                row,
                len: r.len(),
                expected: n,
            });
        }
        Ok(FlowNetwork { n, capacity })
    }

    /// Edge weights become capacities; parallel edges add up and undirected
    /// edges carry capacity in both directions
    pub fn from_graph(graph: &Graph) -> Result<Self, GraphError> {
        let mut network = Self::try_new(graph.num_vertices())?;
        for (u, v, w) in graph.arcs() {
            let capacity = Capacity::try_from(w).map_err(|_| GraphError::NegativeCapacity {
                from: u,
                to: v,
                capacity: w,
            })?;
            network.add_capacity(u, v, capacity)?;
        }
        Ok(network)
    }

    pub fn add_capacity(&mut self, u: Vertex, v: Vertex, c: Capacity) -> Result<(), GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        self.capacity[u][v] = self.capacity[u][v]
            .checked_add(c)
            .ok_or(GraphError::CapacityOverflow { from: u, to: v })?;
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

    pub fn get_capacity(&self, u: Vertex, v: Vertex) -> Capacity {
        self.capacity[u][v]
    }
}

/// Result of a maximum-flow computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaxFlow {
    /// Total flow from source to sink
    pub value: Capacity,
    /// flow[u][v] = flow sent along arc u -> v
    pub flow: Vec<Vec<Capacity>>,
    pub augmenting_paths: usize,
    /// Vertices still reachable from the source in the final residual graph
    pub source_side: Vec<bool>,
    /// Saturated arcs leaving the source side
    pub cut_edges: Vec<(Vertex, Vertex)>,
}

impl MaxFlow {
    pub fn cut_capacity(&self, network: &FlowNetwork) -> Capacity {
        self.cut_edges
            .iter()
            .map(|&(u, v)| network.get_capacity(u, v))
            .fold(0, Capacity::saturating_add)
    }
}

pub fn max_flow(
    network: &FlowNetwork,
    source: Vertex,
    sink: Vertex,
) -> Result<MaxFlow, GraphError> {
    max_flow_with_progress(network, source, sink, None)
}

/// Edmonds-Karp: repeatedly augment along a shortest (BFS) path in the
/// residual capacity matrix until the sink is unreachable.
pub fn max_flow_with_progress(
    network: &FlowNetwork,
    source: Vertex,
    sink: Vertex,
    tx: Option<&Sender<SolverEvent>>,
) -> Result<MaxFlow, GraphError> {
    network.check_vertex(source)?;
    network.check_vertex(sink)?;
    if source == sink {
        return Err(GraphError::SourceIsSink(source));
    }

    let n = network.num_vertices();
    let mut residual = network.capacity.clone();
    let mut parent = vec![None; n];
    let mut value: Capacity = 0;
    let mut augmenting_paths = 0;

    let source_side = loop {
        let visited = bfs(&residual, source, &mut parent);
        if !visited[sink] {
            break visited;
        }

        let path = trace_path(&parent, source, sink);
        let bottleneck = path
            .iter()
            .tuple_windows()
            .map(|(&u, &v)| residual[u][v])
            .min()
            .unwrap_or(0);

        for (&u, &v) in path.iter().tuple_windows() {
            residual[u][v] -= bottleneck;
            residual[v][u] = residual[v][u]
                .checked_add(bottleneck)
                .ok_or(GraphError::CapacityOverflow { from: v, to: u })?;
        }

        value = value
            .checked_add(bottleneck)
            .ok_or(GraphError::CapacityOverflow {
                from: source,
                to: sink,
            })?;
        augmenting_paths += 1;
        emit(tx, SolverEvent::AugmentingPath { path, bottleneck });
    };

    let mut flow = vec![vec![0; n]; n];
    let mut cut_edges = Vec::new();
    for u in 0..n {
        for v in 0..n {
            let capacity = network.capacity[u][v];
            flow[u][v] = capacity.saturating_sub(residual[u][v]);
            if source_side[u] && !source_side[v] && capacity > 0 {
                cut_edges.push((u, v));
            }
        }
    }

    Ok(MaxFlow {
        value,
        flow,
        augmenting_paths,
        source_side,
        cut_edges,
    })
}

/// Breadth-first search over arcs with spare capacity, filling `parent`
fn bfs(residual: &[Vec<Capacity>], source: Vertex, parent: &mut [Option<Vertex>]) -> Vec<bool> {
    let mut visited = vec![false; residual.len()];
    visited[source] = true;
    parent.fill(None);

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for (v, &capacity) in residual[u].iter().enumerate() {
            if !visited[v] && capacity > 0 {
                visited[v] = true;
                parent[v] = Some(u);
                queue.push_back(v);
            }
        }
    }

    visited
}

fn trace_path(parent: &[Option<Vertex>], source: Vertex, sink: Vertex) -> Vec<Vertex> {
    let mut path = vec![sink];
    let mut current = sink;
    while current != source {
        match parent[current] {
            Some(p) => current = p,
            None => break,
        }
        path.push(current);
    }
    path.reverse();
    path
}
