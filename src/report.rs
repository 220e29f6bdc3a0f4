use crate::matching::{BipartiteGraph, Matching};
use crate::max_flow::{FlowNetwork, MaxFlow};
use crate::paths::{AllPairs, ShortestPaths};
use crate::utils::format_distance;
use crate::Vertex;
use itertools::Itertools;
use std::io::{self, Write};

const RULE: &str = "------------------------------------------------------------";

fn write_heading<W: Write>(writer: &mut W, title: &str) -> io::Result<()> {
    writeln!(writer, "{}", RULE)?;
    writeln!(writer, "{}", title)?;
    writeln!(writer, "{}", RULE)
}

/// Distance and path for every vertex of a single-source tree
pub fn write_shortest_paths<W: Write>(writer: &mut W, paths: &ShortestPaths) -> io::Result<()> {
    write_heading(
        writer,
        &format!("Shortest paths from vertex {}", paths.source),
    )?;
    for v in 0..paths.distances.len() {
        match paths.path_to(v) {
            Some(path) => writeln!(
                writer,
                "  {:>3}: {:>8}  via {}",
                v,
                format_distance(paths.distance(v)),
                path.iter().join(" -> ")
            )?,
            None => writeln!(writer, "  {:>3}: {:>8}  unreachable", v, "inf")?,
        }
    }
    writeln!(
        writer,
        "Reachable vertices: {}/{}",
        paths.reachable_count(),
        paths.distances.len()
    )
}

/// All-pairs distance matrix, `inf` where no path exists
pub fn write_all_pairs<W: Write>(writer: &mut W, all: &AllPairs) -> io::Result<()> {
    let n = all.num_vertices();
    write_heading(writer, &format!("All-pairs distances ({} vertices)", n))?;

    let width = (0..n)
        .flat_map(|u| all.row(u).iter().map(|&d| format_distance(d).len()))
        .chain(std::iter::once(n.to_string().len()))
        .max()
        .unwrap_or(1);

    writeln!(
        writer,
        "  {:>w$} | {}",
        "",
        (0..n).map(|v| format!("{:>w$}", v, w = width)).join(" "),
        w = width
    )?;
    for u in 0..n {
        writeln!(
            writer,
            "  {:>w$} | {}",
            u,
            all.row(u)
                .iter()
                .map(|&d| format!("{:>w$}", format_distance(d), w = width))
                .join(" "),
            w = width
        )?;
    }
    Ok(())
}

pub fn write_max_flow<W: Write>(
    writer: &mut W,
    network: &FlowNetwork,
    source: Vertex,
    sink: Vertex,
    result: &MaxFlow,
) -> io::Result<()> {
    write_heading(
        writer,
        &format!("Maximum flow from {} to {}", source, sink),
    )?;
    writeln!(writer, "Flow value: {}", result.value)?;
    writeln!(writer, "Augmenting paths: {}", result.augmenting_paths)?;
    writeln!(writer)?;

    writeln!(writer, "Arc flows (flow/capacity):")?;
    let n = network.num_vertices();
    let used = (0..n)
        .cartesian_product(0..n)
        .filter(|&(u, v)| result.flow[u][v] > 0);
    for (u, v) in used {
        writeln!(
            writer,
            "  {} -> {}: {}/{}",
            u,
            v,
            result.flow[u][v],
            network.get_capacity(u, v)
        )?;
    }
    writeln!(writer)?;

    let source_side = (0..n).filter(|&v| result.source_side[v]).join(", ");
    writeln!(writer, "Minimum cut source side: {{{}}}", source_side)?;
    writeln!(
        writer,
        "Cut edges: {}",
        result
            .cut_edges
            .iter()
            .map(|(u, v)| format!("{} -> {}", u, v))
            .join(", ")
    )?;
    writeln!(writer, "Cut capacity: {}", result.cut_capacity(network))
}

pub fn write_matching<W: Write>(
    writer: &mut W,
    graph: &BipartiteGraph,
    matching: &Matching,
) -> io::Result<()> {
    write_heading(
        writer,
        &format!(
            "Maximum bipartite matching ({} left, {} right, {} edges)",
            graph.left,
            graph.right,
            graph.num_edges()
        ),
    )?;
    writeln!(writer, "Matching size: {}", matching.size())?;
    for (l, r) in &matching.pairs {
        writeln!(writer, "  L{} - R{}", l, r)?;
    }
    let unmatched = (0..graph.left)
        .filter(|&l| matching.match_of_left[l].is_none())
        .map(|l| format!("L{}", l))
        .join(", ");
    if !unmatched.is_empty() {
        writeln!(writer, "Unmatched left vertices: {}", unmatched)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bellman_ford, johnson, matching, max_flow, Graph};

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_shortest_paths_report() {
        let g = Graph::from_edges(3, true, [(0, 1, -2)]).unwrap();
        let paths = bellman_ford::bellman_ford(&g, 0).unwrap();
        let text = render(|w| write_shortest_paths(w, &paths));
        assert!(text.contains("via 0 -> 1"));
        assert!(text.contains("unreachable"));
        assert!(text.contains("Reachable vertices: 2/3"));
    }

    #[test]
    fn test_all_pairs_report_marks_inf() {
        let g = Graph::from_edges(2, true, [(0, 1, 5)]).unwrap();
        let all = johnson::johnson(&g).unwrap();
        let text = render(|w| write_all_pairs(w, &all));
        let last = text.lines().last().unwrap();
        assert!(last.contains("inf"), "{}", last);
    }

    #[test]
    fn test_max_flow_report() {
        let network =
            max_flow::FlowNetwork::from_capacity_matrix(vec![vec![0, 4], vec![0, 0]]).unwrap();
        let result = max_flow::max_flow(&network, 0, 1).unwrap();
        let text = render(|w| write_max_flow(w, &network, 0, 1, &result));
        assert!(text.contains("Flow value: 4"));
        assert!(text.contains("0 -> 1: 4/4"));
        assert!(text.contains("Minimum cut source side: {0}"));
    }

    #[test]
    fn test_matching_report_lists_unmatched() {
        let mut g = matching::BipartiteGraph::new(2, 1);
        g.add_edge(0, 0).unwrap();
        g.add_edge(1, 0).unwrap();
        let m = matching::maximum_matching(&g);
        let text = render(|w| write_matching(w, &g, &m));
        assert!(text.contains("L0 - R0"));
        assert!(text.contains("Unmatched left vertices: L1"));
    }
}
