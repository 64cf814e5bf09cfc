//! Betweenness centrality via Brandes' algorithm.
//!
//! For each source `s`, a BFS over outgoing edges counts shortest paths
//! (`sigma`) and records predecessors; dependencies are then accumulated in
//! reverse discovery order. Edge weights are ignored: every hop costs one.
//!
//! Scores are normalized by `1 / ((n - 1)(n - 2))`, the number of ordered
//! pairs a node could sit between, when `n > 2`.

use std::collections::{HashMap, VecDeque};

use petgraph::graph::NodeIndex;
use petgraph::Direction;

use crate::graph::DirectedView;
use crate::metrics::MetricVector;

/// Compute normalized betweenness centrality for every node.
pub fn betweenness_centrality(graph: &DirectedView) -> MetricVector {
    let n = graph.node_count();
    if n == 0 {
        return HashMap::new();
    }

    let mut cb = vec![0.0_f64; n];

    for s in graph.node_indices() {
        let si = s.index();

        let mut stack: Vec<NodeIndex> = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];

        let mut sigma = vec![0.0_f64; n];
        sigma[si] = 1.0;

        let mut dist: Vec<i64> = vec![-1; n];
        dist[si] = 0;

        let mut queue = VecDeque::from([s]);

        while let Some(v) = queue.pop_front() {
            let vi = v.index();
            stack.push(v);

            for w in graph.neighbors_directed(v, Direction::Outgoing) {
                let wi = w.index();

                if dist[wi] < 0 {
                    dist[wi] = dist[vi] + 1;
                    queue.push_back(w);
                }

                if dist[wi] == dist[vi] + 1 {
                    sigma[wi] += sigma[vi];
                    predecessors[wi].push(v);
                }
            }
        }

        let mut delta = vec![0.0_f64; n];

        while let Some(w) = stack.pop() {
            let wi = w.index();

            for &v in &predecessors[wi] {
                let vi = v.index();
                delta[vi] += (sigma[vi] / sigma[wi]) * (1.0 + delta[wi]);
            }

            if wi != si {
                cb[wi] += delta[wi];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for value in &mut cb {
            *value *= scale;
        }
    }

    graph
        .node_indices()
        .map(|idx| (graph[idx].clone(), cb[idx.index()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphViews;

    fn directed(edges: &[(&str, &str)]) -> DirectedView {
        GraphViews::from_edges(edges.iter().map(|&(a, b)| (a, b, 1.0)))
            .unwrap()
            .directed()
            .clone()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-10,
            "actual ({actual}) != expected ({expected})"
        );
    }

    #[test]
    fn empty_graph_returns_empty() {
        assert!(betweenness_centrality(&DirectedView::default()).is_empty());
    }

    #[test]
    fn middle_of_chain_carries_the_path() {
        // a -> b -> c: only a->c passes through b; 2 * 1 ordered pairs possible
        let scores = betweenness_centrality(&directed(&[("a", "b"), ("b", "c")]));
        assert_close(scores["a"], 0.0);
        assert_close(scores["b"], 0.5);
        assert_close(scores["c"], 0.0);
    }

    #[test]
    fn parallel_routes_split_credit() {
        // Two equal-length routes from s to t
        let scores = betweenness_centrality(&directed(&[
            ("s", "a"),
            ("s", "b"),
            ("a", "t"),
            ("b", "t"),
        ]));
        // Each carries half of the single s->t pair, scaled by 1/(3*2)
        assert_close(scores["a"], 0.5 / 6.0);
        assert_close(scores["b"], 0.5 / 6.0);
        assert_close(scores["s"], 0.0);
    }

    #[test]
    fn two_nodes_are_not_rescaled() {
        let scores = betweenness_centrality(&directed(&[("a", "b"), ("b", "a")]));
        assert_close(scores["a"], 0.0);
        assert_close(scores["b"], 0.0);
    }

    #[test]
    fn every_node_gets_a_score() {
        let scores = betweenness_centrality(&directed(&[("a", "b"), ("c", "d")]));
        assert_eq!(scores.len(), 4);
    }
}
