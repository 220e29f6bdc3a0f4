use crate::matching::BipartiteGraph;
use crate::max_flow::{Capacity, FlowNetwork};
use crate::{Graph, InputError, Vertex, Weight};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, space0, space1},
    combinator::{eof, map, map_res, opt, recognize, value},
    multi::{many0, separated_list1},
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};
use std::path::Path;

type RawEdge = (Vertex, Vertex, Weight);

/// Parse line ending (handles both \n and \r\n)
fn line_ending(input: &str) -> IResult<&str, &str> {
    alt((tag("\n"), tag("\r\n")))(input)
}

/// Trailing spaces followed by a line ending or the end of input
fn end_of_line(input: &str) -> IResult<&str, ()> {
    value((), preceded(space0, alt((line_ending, eof))))(input)
}

fn blank_lines(input: &str) -> IResult<&str, ()> {
    value((), many0(preceded(space0, line_ending)))(input)
}

/// Parse a single unsigned integer
fn parse_usize(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

fn parse_capacity(input: &str) -> IResult<&str, Capacity> {
    map_res(digit1, |s: &str| s.parse::<Capacity>())(input)
}

/// Parse a possibly negative integer weight
fn parse_weight(input: &str) -> IResult<&str, Weight> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<Weight>()
    })(input)
}

fn graph_kind(input: &str) -> IResult<&str, bool> {
    preceded(
        space0,
        alt((
            value(true, tag("directed")),
            value(false, tag("undirected")),
        )),
    )(input)
}

/// `directed <n>` or `undirected <n>`
fn parse_graph_header(input: &str) -> IResult<&str, (bool, usize)> {
    let (input, directed) = graph_kind(input)?;
    let (input, n) = terminated(preceded(space1, parse_usize), end_of_line)(input)?;
    Ok((input, (directed, n)))
}

/// `u v w`
fn parse_weighted_edge(input: &str) -> IResult<&str, RawEdge> {
    terminated(
        tuple((
            preceded(space0, parse_usize),
            preceded(space1, parse_usize),
            preceded(space1, parse_weight),
        )),
        end_of_line,
    )(input)
}

/// `l r`
fn parse_pair(input: &str) -> IResult<&str, (Vertex, Vertex)> {
    terminated(
        pair(preceded(space0, parse_usize), preceded(space1, parse_usize)),
        end_of_line,
    )(input)
}

/// Blank lines and trailing spaces, then nothing else
fn finish(input: &str) -> IResult<&str, ()> {
    value((), tuple((blank_lines, space0, eof)))(input)
}

fn graph_description(input: &str) -> IResult<&str, (bool, usize, Vec<RawEdge>)> {
    let (input, (directed, n)) = preceded(blank_lines, parse_graph_header)(input)?;
    let (input, edges) = many0(preceded(blank_lines, parse_weighted_edge))(input)?;
    let (input, _) = finish(input)?;
    Ok((input, (directed, n, edges)))
}

/// Parse a row of space-separated capacities
fn parse_row(input: &str) -> IResult<&str, Vec<Capacity>> {
    preceded(space0, separated_list1(space1, parse_capacity))(input)
}

/// Parse a complete capacity matrix (n rows of n elements each).
///
/// Rows accumulate as they are read, so an oversized `n` fails on the first
/// short row instead of allocating up front.
fn parse_capacity_matrix(input: &str, n: usize) -> IResult<&str, Vec<Vec<Capacity>>> {
    let mut rows = Vec::new();
    let mut remaining = input;

    for _ in 0..n {
        let (rest, row) = terminated(parse_row, end_of_line)(remaining)?;

        if row.len() != n {
            return Err(nom::Err::Failure(nom::error::Error::new(
                remaining,
                nom::error::ErrorKind::LengthValue,
            )));
        }

        rows.push(row);
        remaining = rest;
    }

    Ok((remaining, rows))
}

fn flow_description(input: &str) -> IResult<&str, Vec<Vec<Capacity>>> {
    let (input, n) = preceded(
        blank_lines,
        terminated(preceded(space0, parse_usize), end_of_line),
    )(input)?;
    let (input, matrix) = parse_capacity_matrix(input, n)?;
    let (input, _) = finish(input)?;
    Ok((input, matrix))
}

fn bipartite_description(input: &str) -> IResult<&str, (usize, usize, Vec<(Vertex, Vertex)>)> {
    let (input, (left, right)) = preceded(
        blank_lines,
        map(
            tuple((
                preceded(space0, tag("bipartite")),
                preceded(space1, parse_usize),
                preceded(space1, parse_usize),
                end_of_line,
            )),
            |(_, l, r, _)| (l, r),
        ),
    )(input)?;
    let (input, edges) = many0(preceded(blank_lines, parse_pair))(input)?;
    let (input, _) = finish(input)?;
    Ok((input, (left, right, edges)))
}

/// Turn a nom error into a syntax error carrying the 1-based line number
fn syntax_error(full: &str, err: nom::Err<nom::error::Error<&str>>) -> InputError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let offset = full.len() - e.input.len();
            let line = full[..offset].matches('\n').count() + 1;
            let near = e.input.lines().next().unwrap_or("");
            InputError::Syntax {
                line,
                message: format!("{:?} near {:?}", e.code, near),
            }
        }
        nom::Err::Incomplete(_) => InputError::Syntax {
            line: full.lines().count(),
            message: "unexpected end of input".to_string(),
        },
    }
}

/// Parse a weighted graph: `directed <n>` / `undirected <n>` then `u v w` lines
pub fn parse_graph_str(input: &str) -> Result<Graph, InputError> {
    let (_, (directed, n, edges)) =
        graph_description(input).map_err(|e| syntax_error(input, e))?;
    Ok(Graph::from_edges(n, directed, edges)?)
}

/// Parse a flow network: vertex count followed by a capacity matrix
pub fn parse_flow_network_str(input: &str) -> Result<FlowNetwork, InputError> {
    let (_, matrix) = flow_description(input).map_err(|e| syntax_error(input, e))?;
    Ok(FlowNetwork::from_capacity_matrix(matrix)?)
}

/// Parse a bipartite graph: `bipartite <left> <right>` then `l r` lines
pub fn parse_bipartite_str(input: &str) -> Result<BipartiteGraph, InputError> {
    let (_, (left, right, edges)) =
        bipartite_description(input).map_err(|e| syntax_error(input, e))?;
    let mut graph = BipartiteGraph::try_new(left, right)?;
    for (l, r) in edges {
        graph.add_edge(l, r)?;
    }
    Ok(graph)
}

fn read_input(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_graph_file(path: &Path) -> Result<Graph, InputError> {
    parse_graph_str(&read_input(path)?)
}

pub fn read_flow_network_file(path: &Path) -> Result<FlowNetwork, InputError> {
    parse_flow_network_str(&read_input(path)?)
}

pub fn read_bipartite_file(path: &Path) -> Result<BipartiteGraph, InputError> {
    parse_bipartite_str(&read_input(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;

    #[test]
    fn test_parse_directed_graph() {
        let g = parse_graph_str("directed 3\n0 1 4\n1 2 -7\n").unwrap();
        assert!(g.is_directed());
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.neighbors(1), &[(2, -7)]);
    }

    #[test]
    fn test_parse_tolerates_blank_lines_and_crlf() {
        let g = parse_graph_str("\nundirected 2\r\n\r\n  0 1 3  \r\n\n").unwrap();
        assert!(!g.is_directed());
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.neighbors(1), &[(0, 3)]);
    }

    #[test]
    fn test_parse_graph_without_edges_or_final_newline() {
        let g = parse_graph_str("directed 4").unwrap();
        assert_eq!(g.num_vertices(), 4);
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn test_reports_line_of_bad_edge() {
        let err = parse_graph_str("directed 3\n0 1 4\n1 x 2\n").unwrap_err();
        assert!(matches!(err, InputError::Syntax { line: 3, .. }), "{}", err);
    }

    #[test]
    fn test_out_of_range_vertex_is_graph_error() {
        let err = parse_graph_str("directed 2\n0 2 1\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::Graph(GraphError::VertexOutOfRange { vertex: 2, .. })
        ));
    }

    #[test]
    fn test_parse_flow_matrix() {
        let network = parse_flow_network_str("3\n0 5 0\n0 0 7\n0 0 0\n").unwrap();
        assert_eq!(network.num_vertices(), 3);
        assert_eq!(network.get_capacity(1, 2), 7);
    }

    #[test]
    fn test_flow_matrix_short_row() {
        let err = parse_flow_network_str("2\n0 1\n0\n").unwrap_err();
        assert!(matches!(err, InputError::Syntax { line: 3, .. }), "{}", err);
    }

    #[test]
    fn test_flow_matrix_negative_entry_rejected() {
        assert!(parse_flow_network_str("2\n0 -1\n0 0\n").is_err());
    }

    #[test]
    fn test_parse_bipartite() {
        let g = parse_bipartite_str("bipartite 2 3\n0 2\n1 0\n1 1\n").unwrap();
        assert_eq!(g.left, 2);
        assert_eq!(g.right, 3);
        assert_eq!(g.num_edges(), 3);
        assert!(g.has_edge(0, 2));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let err = parse_bipartite_str("bipartite 1 1\n0 0\nend\n").unwrap_err();
        assert!(matches!(err, InputError::Syntax { line: 3, .. }), "{}", err);
    }

    #[test]
    fn test_oversized_graph_header_is_an_error() {
        let err = parse_graph_str("directed 18446744073709551615\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::Graph(GraphError::TooManyVertices(_))
        ));
    }

    #[test]
    fn test_oversized_flow_header_is_an_error() {
        let err = parse_flow_network_str("18446744073709551615\n0\n").unwrap_err();
        assert!(matches!(err, InputError::Syntax { line: 2, .. }), "{}", err);
        assert!(parse_flow_network_str("3\n0 1 2\n").is_err());
    }

    #[test]
    fn test_oversized_bipartite_header_is_an_error() {
        let err = parse_bipartite_str("bipartite 18446744073709551615 1\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::Graph(GraphError::TooManyVertices(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = read_graph_file(Path::new("/nonexistent/graph.txt")).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }
}
