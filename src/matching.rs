use crate::event::{emit, SolverEvent};
use crate::max_flow::FlowNetwork;
use crate::{GraphError, Vertex};
use serde::Serialize;
use std::sync::mpsc::Sender;

/// Unweighted bipartite graph; left and right vertices are numbered independently
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BipartiteGraph {
    /// Number of left vertices
    pub left: usize,
    /// Number of right vertices
    pub right: usize,
    /// adj[l] = right vertices adjacent to left vertex l
    pub adj: Vec<Vec<Vertex>>,
}

impl BipartiteGraph {
    pub fn new(left: usize, right: usize) -> Self {
        BipartiteGraph {
            left,
            right,
            adj: vec![Vec::new(); left],
        }
    }

    /// Like [`BipartiteGraph::new`], but sides too large to allocate are an error
    pub fn try_new(left: usize, right: usize) -> Result<Self, GraphError> {
        // matching keeps one slot per right vertex
        Vec::<Option<Vertex>>::new()
            .try_reserve_exact(right)
            .map_err(|_| GraphError::TooManyVertices(right))?;

        let mut adj = Vec::new();
        adj.try_reserve_exact(left)
            .map_err(|_| GraphError::TooManyVertices(left))?;
        adj.resize_with(left, Vec::new);
        Ok(BipartiteGraph { left, right, adj })
    }

    pub fn add_edge(&mut self, l: Vertex, r: Vertex) -> Result<(), GraphError> {
        if l >= self.left {
            return Err(GraphError::VertexOutOfRange {
                vertex: l,
                vertices: self.left,
            });
        }
        if r >= self.right {
            return Err(GraphError::VertexOutOfRange {
                vertex: r,
                vertices: self.right,
            });
        }
        self.adj[l].push(r);
        Ok(())
    }

    pub fn neighbors(&self, l: Vertex) -> &[Vertex] {
        &self.adj[l]
    }

    pub fn has_edge(&self, l: Vertex, r: Vertex) -> bool {
        self.adj.get(l).is_some_and(|list| list.contains(&r))
    }

    pub fn num_edges(&self) -> usize {
        self.adj.iter().map(Vec::len).sum()
    }

    /// Unit-capacity network: source -> left -> right -> sink.
    ///
    /// Left vertex `l` becomes `l`, right vertex `r` becomes `left + r`, and
    /// the returned pair is (source, sink).
    pub fn to_flow_network(&self) -> (FlowNetwork, Vertex, Vertex) {
        let source = self.left + self.right;
        let sink = source + 1;
        let mut network = FlowNetwork::new(sink + 1);
        for l in 0..self.left {
            network.capacity[source][l] = 1;
            for &r in &self.adj[l] {
                network.capacity[l][self.left + r] = 1;
            }
        }
        for r in 0..self.right {
            network.capacity[self.left + r][sink] = 1;
        }
        (network, source, sink)
    }
}

/// A maximum matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matching {
    /// Matched (left, right) pairs ordered by left vertex
    pub pairs: Vec<(Vertex, Vertex)>,
    pub match_of_left: Vec<Option<Vertex>>,
    pub match_of_right: Vec<Option<Vertex>>,
}

impl Matching {
    pub fn size(&self) -> usize {
        self.pairs.len()
    }
}

pub fn maximum_matching(graph: &BipartiteGraph) -> Matching {
    maximum_matching_with_progress(graph, None)
}

/// Kuhn's algorithm: one DFS augmenting search per left vertex
pub fn maximum_matching_with_progress(
    graph: &BipartiteGraph,
    tx: Option<&Sender<SolverEvent>>,
) -> Matching {
    let mut match_of_right: Vec<Option<Vertex>> = vec![None; graph.right];
    let mut size = 0;

    // seen_in[r] == Some(l) marks right vertex r as visited during the search from l
    let mut seen_in: Vec<Option<Vertex>> = vec![None; graph.right];

    for l in 0..graph.left {
        if try_augment(graph, l, &mut seen_in, &mut match_of_right) {
            size += 1;
            emit(tx, SolverEvent::MatchGrown { left: l, size });
        }
    }

    let mut match_of_left = vec![None; graph.left];
    for (r, l) in match_of_right.iter().enumerate() {
        if let Some(l) = *l {
            match_of_left[l] = Some(r);
        }
    }
    let pairs = match_of_left
        .iter()
        .enumerate()
        .filter_map(|(l, r)| r.map(|r| (l, r)))
        .collect();

    Matching {
        pairs,
        match_of_left,
        match_of_right,
    }
}

/// Depth-first search for an augmenting path from `root`, flipping it on success.
///
/// The search keeps its own stack of (left vertex, next neighbor index) frames,
/// with `via[i]` the right vertex that led from frame `i` to frame `i + 1`.
fn try_augment(
    graph: &BipartiteGraph,
    root: Vertex,
    seen_in: &mut [Option<Vertex>],
    match_of_right: &mut [Option<Vertex>],
) -> bool {
    let mut stack: Vec<(Vertex, usize)> = vec![(root, 0)];
    let mut via: Vec<Vertex> = Vec::new();

    while let Some(frame) = stack.last_mut() {
        let l = frame.0;
        let Some(&r) = graph.neighbors(l).get(frame.1) else {
            stack.pop();
            via.pop();
            continue;
        };
        frame.1 += 1;

        if seen_in[r] == Some(root) {
            continue;
        }
        seen_in[r] = Some(root);
        via.push(r);

        match match_of_right[r] {
            Some(other) => stack.push((other, 0)),
            None => {
                for (&(l, _), &r) in stack.iter().zip(&via) {
                    match_of_right[r] = Some(l);
                }
                return true;
            }
        }
    }
    false
}
