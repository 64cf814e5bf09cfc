//! Eigenvector centrality via power iteration.
//!
//! # Algorithm
//!
//! 1. Initialize scores uniformly (`1 / N`).
//! 2. For each edge `u → v`: `score(v) += score_prev(u)`, on top of
//!    `score_prev(v)` itself. Iterating `A + I` rather than `A` keeps the
//!    iteration from oscillating on bipartite structure.
//! 3. Normalize the score vector to unit L2 norm.
//! 4. Stop when `Σ |score - score_prev| < N * tolerance`.
//!
//! Scores follow incoming edges and ignore edge weights. Graphs without the
//! strong connectivity the dominant eigenvector needs (a DAG, for example)
//! usually fail to settle within `max_iter` and surface a
//! [`ConvergenceError`].

use std::collections::HashMap;

use petgraph::visit::EdgeRef;

use crate::config::EigenvectorConfig;
use crate::error::ConvergenceError;
use crate::graph::DirectedView;
use crate::metrics::{MetricKind, MetricVector};

/// Compute eigenvector centrality for every node of the directed view.
pub fn eigenvector_centrality(
    graph: &DirectedView,
    config: &EigenvectorConfig,
) -> Result<MetricVector, ConvergenceError> {
    let n = graph.node_count();
    if n == 0 {
        return Ok(HashMap::new());
    }

    let n_f64 = n as f64;
    let mut scores = vec![1.0 / n_f64; n];

    for iteration in 1..=config.max_iter {
        let mut new_scores = scores.clone();

        for edge in graph.edge_references() {
            new_scores[edge.target().index()] += scores[edge.source().index()];
        }

        let norm = new_scores.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for x in &mut new_scores {
                *x /= norm;
            }
        }

        let diff: f64 = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        scores = new_scores;

        if diff < n_f64 * config.tolerance {
            log::debug!("Eigenvector centrality converged after {iteration} iterations");
            return Ok(graph
                .node_indices()
                .map(|idx| (graph[idx].clone(), scores[idx.index()]))
                .collect());
        }
    }

    Err(ConvergenceError {
        metric: MetricKind::Eigenvector,
        iterations: config.max_iter,
    })
}
