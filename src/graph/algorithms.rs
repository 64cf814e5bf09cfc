//! Structural algorithms on the undirected view

use std::collections::HashMap;

use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::graph::UndirectedView;

const UNVISITED: usize = usize::MAX;

/// An undirected edge given by its two endpoint identifiers
pub type BridgeEdge = (String, String);

/// DFS frame for the iterative low-link walk
struct Frame {
    node: NodeIndex,
    parent_edge: Option<EdgeIndex>,
    incident: Vec<(EdgeIndex, NodeIndex)>,
    cursor: usize,
}

impl Frame {
    fn new(graph: &UndirectedView, node: NodeIndex, parent_edge: Option<EdgeIndex>) -> Self {
        let incident = graph
            .edges(node)
            .map(|edge| {
                let other = if edge.source() == node {
                    edge.target()
                } else {
                    edge.source()
                };
                (edge.id(), other)
            })
            .collect();

        Self {
            node,
            parent_edge,
            incident,
            cursor: 0,
        }
    }
}

/// Find every bridge: an edge whose removal splits its connected component.
///
/// Tarjan's low-link DFS, driven by an explicit stack so deep chains do not
/// exhaust the call stack. Each bridge is reported once as
/// `(dfs_parent, dfs_child)`. Self-loops are never bridges.
pub fn find_bridges(graph: &UndirectedView) -> Vec<BridgeEdge> {
    let n = graph.node_count();
    let mut disc = vec![UNVISITED; n];
    let mut low = vec![UNVISITED; n];
    let mut timer = 0;
    let mut bridges = Vec::new();

    for root in graph.node_indices() {
        if disc[root.index()] != UNVISITED {
            continue;
        }

        disc[root.index()] = timer;
        low[root.index()] = timer;
        timer += 1;

        let mut stack = vec![Frame::new(graph, root, None)];

        loop {
            let step = stack.last_mut().map(|frame| {
                let next = frame.incident.get(frame.cursor).copied();
                frame.cursor += 1;
                (frame.node, frame.parent_edge, next)
            });

            let Some((node, parent_edge, next)) = step else {
                break;
            };

            match next {
                Some((edge, other)) => {
                    // Skip only the tree edge we arrived by
                    if Some(edge) == parent_edge {
                        continue;
                    }

                    if disc[other.index()] == UNVISITED {
                        disc[other.index()] = timer;
                        low[other.index()] = timer;
                        timer += 1;
                        stack.push(Frame::new(graph, other, Some(edge)));
                    } else {
                        low[node.index()] = low[node.index()].min(disc[other.index()]);
                    }
                }
                None => {
                    stack.pop();
                    if let Some(parent) = stack.last() {
                        let p = parent.node.index();
                        let c = node.index();
                        low[p] = low[p].min(low[c]);
                        if low[c] > disc[p] {
                            bridges.push((graph[parent.node].clone(), graph[node].clone()));
                        }
                    }
                }
            }
        }
    }

    log::debug!("Found {} bridges", bridges.len());
    bridges
}

/// Degree of every node; a self-loop counts twice
pub fn degrees(graph: &UndirectedView) -> HashMap<String, usize> {
    let mut counts = vec![0usize; graph.node_count()];

    for edge in graph.edge_references() {
        counts[edge.source().index()] += 1;
        counts[edge.target().index()] += 1;
    }

    graph
        .node_indices()
        .map(|idx| (graph[idx].clone(), counts[idx.index()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphViews;
    use std::collections::BTreeSet;

    fn undirected(edges: &[(&str, &str)]) -> UndirectedView {
        GraphViews::from_edges(edges.iter().map(|&(a, b)| (a, b, 1.0)))
            .unwrap()
            .undirected()
            .clone()
    }

    fn bridge_set(graph: &UndirectedView) -> BTreeSet<(String, String)> {
        find_bridges(graph)
            .into_iter()
            .map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
            .collect()
    }

    fn pair(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn single_edge_is_a_bridge() {
        let graph = undirected(&[("a", "b")]);
        assert_eq!(bridge_set(&graph), BTreeSet::from([pair("a", "b")]));
    }

    #[test]
    fn cycle_has_no_bridges() {
        let graph = undirected(&[("a", "b"), ("b", "c"), ("c", "a")]);
        assert!(find_bridges(&graph).is_empty());
    }

    #[test]
    fn two_triangles_joined_by_one_edge() {
        let graph = undirected(&[
            ("a", "b"),
            ("b", "c"),
            ("c", "a"),
            ("c", "d"),
            ("d", "e"),
            ("e", "f"),
            ("f", "d"),
        ]);
        assert_eq!(bridge_set(&graph), BTreeSet::from([pair("c", "d")]));
    }

    #[test]
    fn disconnected_components_each_contribute() {
        let graph = undirected(&[("a", "b"), ("c", "d"), ("e", "f")]);
        assert_eq!(
            bridge_set(&graph),
            BTreeSet::from([pair("a", "b"), pair("c", "d"), pair("e", "f")])
        );
    }

    #[test]
    fn self_loop_is_not_a_bridge() {
        let graph = undirected(&[("a", "a"), ("a", "b")]);
        assert_eq!(bridge_set(&graph), BTreeSet::from([pair("a", "b")]));
    }

    #[test]
    fn long_path_does_not_overflow() {
        let names: Vec<String> = (0..50_000).map(|i| format!("n{i}")).collect();
        let edges: Vec<(&str, &str)> = names
            .windows(2)
            .map(|w| (w[0].as_str(), w[1].as_str()))
            .collect();
        let graph = undirected(&edges);
        assert_eq!(find_bridges(&graph).len(), names.len() - 1);
    }

    #[test]
    fn degree_counts_self_loop_twice() {
        let graph = undirected(&[("a", "b"), ("b", "c"), ("c", "c")]);
        let degree = degrees(&graph);
        assert_eq!(degree["a"], 1);
        assert_eq!(degree["b"], 2);
        assert_eq!(degree["c"], 3);
    }
}
