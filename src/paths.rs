use crate::{Vertex, Weight};
use serde::Serialize;

/// Single-source shortest-path tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortestPaths {
    pub source: Vertex,
    /// distances[v] = None when v is unreachable from the source
    pub distances: Vec<Option<Weight>>,
    /// predecessors[v] = previous vertex on a shortest path to v
    pub predecessors: Vec<Option<Vertex>>,
}

impl ShortestPaths {
    pub(crate) fn new(n: usize, source: Vertex) -> Self {
        let mut distances = vec![None; n];
        distances[source] = Some(0);
        ShortestPaths {
            source,
            distances,
            predecessors: vec![None; n],
        }
    }

    pub fn distance(&self, v: Vertex) -> Option<Weight> {
        self.distances.get(v).copied().flatten()
    }

    pub fn is_reachable(&self, v: Vertex) -> bool {
        self.distance(v).is_some()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    /// Vertices from the source to `v`, or None if `v` is unreachable
    pub fn path_to(&self, v: Vertex) -> Option<Vec<Vertex>> {
        self.distance(v)?;

        let mut path = vec![v];
        let mut current = v;
        while current != self.source {
            current = self.predecessors[current]?;
            path.push(current);
            if path.len() > self.distances.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}

/// All-pairs distance matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllPairs {
    pub distances: Vec<Vec<Option<Weight>>>,
}

impl AllPairs {
    pub fn num_vertices(&self) -> usize {
        self.distances.len()
    }

    pub fn distance(&self, u: Vertex, v: Vertex) -> Option<Weight> {
        self.distances.get(u)?.get(v).copied().flatten()
    }

    pub fn row(&self, u: Vertex) -> &[Option<Weight>] {
        &self.distances[u]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_reconstruction() {
        let mut sp = ShortestPaths::new(4, 0);
        sp.distances = vec![Some(0), Some(1), Some(3), None];
        sp.predecessors = vec![None, Some(0), Some(1), None];

        assert_eq!(sp.path_to(0), Some(vec![0]));
        assert_eq!(sp.path_to(2), Some(vec![0, 1, 2]));
        assert_eq!(sp.path_to(3), None);
        assert_eq!(sp.reachable_count(), 3);
    }

    #[test]
    fn test_out_of_range_distance_is_none() {
        let sp = ShortestPaths::new(2, 1);
        assert_eq!(sp.distance(1), Some(0));
        assert_eq!(sp.distance(9), None);
    }
}
