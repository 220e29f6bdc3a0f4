use crate::event::{emit, SolverEvent};
use crate::paths::ShortestPaths;
use crate::utils::{candidate_distance, check_overflowed, improves};
use crate::{Graph, GraphError, Vertex};
use std::sync::mpsc::Sender;

/// Single-source shortest paths allowing negative weights
pub fn bellman_ford(graph: &Graph, source: Vertex) -> Result<ShortestPaths, GraphError> {
    bellman_ford_with_progress(graph, source, None)
}

/// Up to V-1 relaxation rounds over every arc, then one verification round.
///
/// Only cycles reachable from `source` can be detected. An undirected edge with
/// negative weight is itself a negative cycle.
pub fn bellman_ford_with_progress(
    graph: &Graph,
    source: Vertex,
    tx: Option<&Sender<SolverEvent>>,
) -> Result<ShortestPaths, GraphError> {
    graph.check_vertex(source)?;

    let n = graph.num_vertices();
    let mut paths = ShortestPaths::new(n, source);
    let mut overflowed_from = vec![None; n];

    for round in 1..n {
        let updated = relax_all(graph, &mut paths, &mut overflowed_from)?;
        emit(tx, SolverEvent::RelaxationRound { round, updated });
        if updated == 0 {
            break;
        }
    }

    if has_improving_arc(graph, &paths)? {
        emit(tx, SolverEvent::NegativeCycleDetected);
        return Err(GraphError::NegativeCycle);
    }

    check_overflowed(&paths.distances, &overflowed_from)?;
    Ok(paths)
}

/// One pass over every arc; returns how many distances shrank
fn relax_all(
    graph: &Graph,
    paths: &mut ShortestPaths,
    overflowed_from: &mut [Option<Vertex>],
) -> Result<usize, GraphError> {
    let mut updated = 0;
    for (u, v, w) in graph.arcs() {
        let Some(du) = paths.distances[u] else {
            continue;
        };
        match candidate_distance(du, w, u, v)? {
            Some(candidate) if improves(candidate, paths.distances[v]) => {
                paths.distances[v] = Some(candidate);
                paths.predecessors[v] = Some(u);
                updated += 1;
            }
            Some(_) => {}
            None => {
                overflowed_from[v].get_or_insert(u);
            }
        }
    }
    Ok(updated)
}

fn has_improving_arc(graph: &Graph, paths: &ShortestPaths) -> Result<bool, GraphError> {
    for (u, v, w) in graph.arcs() {
        if let Some(du) = paths.distances[u] {
            if let Some(candidate) = candidate_distance(du, w, u, v)? {
                if improves(candidate, paths.distances[v]) {
                    return Ok(true);
                }
            }
        }
    }
    Ok(false)
}
