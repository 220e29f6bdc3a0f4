//! Johnson's all-pairs shortest paths.
//!
//! Bellman-Ford from a virtual vertex yields potentials `h` that make every
//! reweighted arc `w + h(u) - h(v)` non-negative, after which Dijkstra runs
//! once per source. The per-source passes share nothing mutable and run on
//! the rayon pool.

use crate::bellman_ford::bellman_ford_with_progress;
use crate::dijkstra::dijkstra;
use crate::event::{emit, SolverEvent};
use crate::paths::{AllPairs, ShortestPaths};
use crate::{Graph, GraphError, Weight};
use rayon::prelude::*;
use std::sync::mpsc::Sender;

pub fn johnson(graph: &Graph) -> Result<AllPairs, GraphError> {
    johnson_with_progress(graph, None)
}

pub fn johnson_with_progress(
    graph: &Graph,
    tx: Option<&Sender<SolverEvent>>,
) -> Result<AllPairs, GraphError> {
    let n = graph.num_vertices();
    let h = potentials(graph, tx)?;
    let reweighted = reweight(graph, &h)?;

    let trees: Vec<ShortestPaths> = (0..n)
        .into_par_iter()
        .map(|source| dijkstra(&reweighted, source))
        .collect::<Result<_, _>>()?;

    let mut distances = Vec::with_capacity(n);
    for tree in &trees {
        emit(
            tx,
            SolverEvent::SourceFinished {
                source: tree.source,
                reachable: tree.reachable_count(),
            },
        );
        distances.push(restore_row(tree, &h)?);
    }

    Ok(AllPairs { distances })
}

/// Shortest distance from a virtual vertex joined to every vertex by a 0-weight arc
pub fn potentials(
    graph: &Graph,
    tx: Option<&Sender<SolverEvent>>,
) -> Result<Vec<Weight>, GraphError> {
    let n = graph.num_vertices();
    let mut augmented = Graph::new_directed(n + 1);
    for (u, v, w) in graph.arcs() {
        augmented.add_edge(u, v, w)?;
    }
    for v in 0..n {
        augmented.add_edge(n, v, 0)?;
    }

    let tree = bellman_ford_with_progress(&augmented, n, tx)?;
    Ok(tree.distances[..n].iter().map(|d| d.unwrap_or(0)).collect())
}

fn reweight(graph: &Graph, h: &[Weight]) -> Result<Graph, GraphError> {
    let mut reweighted = Graph::new_directed(graph.num_vertices());
    for (u, v, w) in graph.arcs() {
        let adjusted = w
            .checked_add(h[u])
            .and_then(|x| x.checked_sub(h[v]))
            .ok_or(GraphError::DistanceOverflow { from: u, to: v })?;
        reweighted.add_edge(u, v, adjusted)?;
    }
    Ok(reweighted)
}

fn restore_row(tree: &ShortestPaths, h: &[Weight]) -> Result<Vec<Option<Weight>>, GraphError> {
    let u = tree.source;
    tree.distances
        .iter()
        .enumerate()
        .map(|(v, d)| match d {
            Some(d) => d
                .checked_sub(h[u])
                .and_then(|x| x.checked_add(h[v]))
                .map(Some)
                .ok_or(GraphError::DistanceOverflow { from: u, to: v }),
            None => Ok(None),
        })
        .collect()
}
