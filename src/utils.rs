use crate::{GraphError, Vertex, Weight};

/// Candidate distance through an arc, or `None` when it exceeds `Weight::MAX`.
///
/// A candidate past the upper bound is never shortest and is skipped; one
/// below `Weight::MIN` is a real distance that cannot be stored.
pub fn candidate_distance(
    base: Weight,
    weight: Weight,
    from: Vertex,
    to: Vertex,
) -> Result<Option<Weight>, GraphError> {
    match base.checked_add(weight) {
        Some(d) => Ok(Some(d)),
        None if weight > 0 => Ok(None),
        None => Err(GraphError::DistanceOverflow { from, to }),
    }
}

/// Fails for the first vertex that was only ever reached by an overflowing candidate
pub fn check_overflowed(
    distances: &[Option<Weight>],
    overflowed_from: &[Option<Vertex>],
) -> Result<(), GraphError> {
    let first = distances
        .iter()
        .zip(overflowed_from)
        .enumerate()
        .find_map(|(to, pair)| match pair {
            (None, Some(from)) => Some((*from, to)),
            _ => None,
        });
    match first {
        Some((from, to)) => Err(GraphError::DistanceOverflow { from, to }),
        None => Ok(()),
    }
}

/// True when `candidate` is strictly shorter than the current tentative distance
pub fn improves(candidate: Weight, current: Option<Weight>) -> bool {
    match current {
        Some(d) => candidate < d,
        None => true,
    }
}

/// Render a distance, with `inf` for unreachable vertices
pub fn format_distance(distance: Option<Weight>) -> String {
    match distance {
        Some(d) => d.to_string(),
        None => "inf".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_distance() {
        assert_eq!(candidate_distance(10, 5, 0, 1), Ok(Some(15)));
        assert_eq!(candidate_distance(10, Weight::MAX, 0, 1), Ok(None));
        assert_eq!(
            candidate_distance(-10, Weight::MIN, 2, 3),
            Err(GraphError::DistanceOverflow { from: 2, to: 3 })
        );
    }

    #[test]
    fn test_check_overflowed() {
        assert_eq!(check_overflowed(&[Some(0), Some(7)], &[None, Some(0)]), Ok(()));
        assert_eq!(
            check_overflowed(&[Some(0), None, None], &[None, None, Some(1)]),
            Err(GraphError::DistanceOverflow { from: 1, to: 2 })
        );
    }

    #[test]
    fn test_improves() {
        assert!(improves(10, None));
        assert!(improves(-1, Some(0)));
        assert!(!improves(3, Some(3)));
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(Some(-4)), "-4");
        assert_eq!(format_distance(None), "inf");
    }
}
