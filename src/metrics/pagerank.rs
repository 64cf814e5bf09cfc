//! Weighted PageRank by power iteration.
//!
//! ```text
//! PR(v) = (1 - d) / N + d * (Σ PR(u) * w(u, v) / W(u) + Σ_dangling PR(u) / N)
//! ```
//!
//! where `W(u)` is the total outgoing weight of `u` and dangling nodes
//! (`W(u) == 0`) spread their rank uniformly over every node.

use std::collections::HashMap;

use petgraph::visit::EdgeRef;

use crate::config::PageRankConfig;
use crate::error::ConvergenceError;
use crate::graph::DirectedView;
use crate::metrics::{MetricKind, MetricVector};

/// Compute PageRank for every node of the directed view.
///
/// Starts from the uniform vector and stops once the L1 change between two
/// iterations drops below `N * tolerance`. Running out of iterations first is
/// an error; partial scores are never returned.
pub fn pagerank(
    graph: &DirectedView,
    config: &PageRankConfig,
) -> Result<MetricVector, ConvergenceError> {
    let n = graph.node_count();
    if n == 0 {
        return Ok(HashMap::new());
    }

    let n_f64 = n as f64;
    let damping = config.damping;

    let mut out_weight = vec![0.0_f64; n];
    for edge in graph.edge_references() {
        out_weight[edge.source().index()] += *edge.weight();
    }
    let dangling: Vec<usize> = (0..n).filter(|&i| out_weight[i] <= 0.0).collect();

    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    for iteration in 1..=config.max_iter {
        let dangling_sum: f64 = dangling.iter().map(|&i| ranks[i]).sum();
        let base = (1.0 - damping) / n_f64 + damping * dangling_sum / n_f64;
        new_ranks.fill(base);

        for edge in graph.edge_references() {
            let src = edge.source().index();
            if out_weight[src] > 0.0 {
                new_ranks[edge.target().index()] +=
                    damping * ranks[src] * *edge.weight() / out_weight[src];
            }
        }

        let delta: f64 = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < n_f64 * config.tolerance {
            log::debug!("PageRank converged after {iteration} iterations");
            return Ok(graph
                .node_indices()
                .map(|idx| (graph[idx].clone(), ranks[idx.index()]))
                .collect());
        }
    }

    Err(ConvergenceError {
        metric: MetricKind::PageRank,
        iterations: config.max_iter,
    })
}
