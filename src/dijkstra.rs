use crate::event::{emit, SolverEvent};
use crate::paths::ShortestPaths;
use crate::utils::{candidate_distance, check_overflowed, improves};
use crate::{Graph, GraphError, Vertex, Weight};
use std::sync::mpsc::Sender;

/// Single-source shortest paths on a graph with non-negative weights
pub fn dijkstra(graph: &Graph, source: Vertex) -> Result<ShortestPaths, GraphError> {
    dijkstra_with_progress(graph, source, None)
}

/// Dijkstra with a settled set and a linear minimum scan, O(V²).
///
/// Negative weights are rejected before the search starts.
pub fn dijkstra_with_progress(
    graph: &Graph,
    source: Vertex,
    tx: Option<&Sender<SolverEvent>>,
) -> Result<ShortestPaths, GraphError> {
    graph.check_vertex(source)?;
    if let Some(edge) = graph.edges().iter().find(|e| e.weight < 0) {
        return Err(GraphError::NegativeWeight {
            from: edge.source,
            to: edge.destination,
            weight: edge.weight,
        });
    }

    let n = graph.num_vertices();
    let mut paths = ShortestPaths::new(n, source);
    let mut settled = vec![false; n];
    let mut overflowed_from = vec![None; n];

    while let Some((u, du)) = closest_unsettled(&paths.distances, &settled) {
        settled[u] = true;
        emit(tx, SolverEvent::VertexSettled { vertex: u, distance: du });

        for &(v, w) in graph.neighbors(u) {
            if settled[v] {
                continue;
            }
            match candidate_distance(du, w, u, v)? {
                Some(candidate) if improves(candidate, paths.distances[v]) => {
                    paths.distances[v] = Some(candidate);
                    paths.predecessors[v] = Some(u);
                }
                Some(_) => {}
                None => {
                    overflowed_from[v].get_or_insert(u);
                }
            }
        }
    }

    check_overflowed(&paths.distances, &overflowed_from)?;
    Ok(paths)
}

/// Unsettled vertex with the smallest tentative distance; ties go to the lower label
fn closest_unsettled(distances: &[Option<Weight>], settled: &[bool]) -> Option<(Vertex, Weight)> {
    (0..distances.len())
        .filter(|&v| !settled[v])
        .filter_map(|v| distances[v].map(|d| (d, v)))
        .min()
        .map(|(d, v)| (v, d))
}
