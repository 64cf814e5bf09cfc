//! Metric normalization and the composite importance score

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::metrics::{Centralities, MetricKind, MetricVector};

/// Mapping from node identifier to composite importance score
pub type ScoreMap = HashMap<String, f64>;

/// Rescale one raw metric over `nodes`.
///
/// Every node in `nodes` gets a value; nodes missing from `raw` count as 0.
/// Values are mean-centred, divided by the spread (`max - min`) and shifted
/// by +1, which keeps them in `(0, 2)`. A metric with no spread maps every
/// node to exactly 1.
pub fn normalize_metric(nodes: &[String], raw: &MetricVector) -> MetricVector {
    if nodes.is_empty() {
        return MetricVector::new();
    }

    let values: Vec<f64> = nodes
        .iter()
        .map(|id| raw.get(id).copied().unwrap_or(0.0))
        .collect();

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let spread = max - min;

    if !(spread > 0.0 && spread.is_finite()) {
        return nodes.iter().map(|id| (id.clone(), 1.0)).collect();
    }

    nodes
        .iter()
        .zip(values)
        .map(|(id, value)| (id.clone(), (value - mean) / spread + 1.0))
        .collect()
}

/// Normalize each centrality and sum them per node
pub fn composite_scores(nodes: &[String], centralities: &Centralities) -> ScoreMap {
    let normalized: Vec<MetricVector> = MetricKind::ALL
        .iter()
        .map(|&kind| normalize_metric(nodes, centralities.get(kind)))
        .collect();

    nodes
        .iter()
        .map(|id| {
            let score: f64 = normalized
                .iter()
                .map(|metric| metric.get(id).copied().unwrap_or(1.0))
                .sum();
            (id.clone(), score)
        })
        .collect()
}

/// Order two `(node, score)` entries: higher score first, then smaller id
pub fn by_rank(a: &(&str, f64), b: &(&str, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// All scored nodes from most to least important
pub fn rank(scores: &ScoreMap) -> Vec<(&str, f64)> {
    let mut ranked: Vec<(&str, f64)> = scores
        .iter()
        .map(|(id, &score)| (id.as_str(), score))
        .collect();
    ranked.sort_by(by_rank);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn vector(entries: &[(&str, f64)]) -> MetricVector {
        entries.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    fn assert_approx_eq(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-10,
            "actual ({actual}) != expected ({expected})"
        );
    }

    #[test]
    fn normalization_centres_on_one() {
        // mean 3, spread 4
        let nodes = ids(&["a", "b", "c"]);
        let normalized = normalize_metric(&nodes, &vector(&[("a", 1.0), ("b", 3.0), ("c", 5.0)]));
        assert_approx_eq(normalized["a"], 0.5);
        assert_approx_eq(normalized["b"], 1.0);
        assert_approx_eq(normalized["c"], 1.5);
    }

    #[test]
    fn constant_metric_is_all_ones() {
        let nodes = ids(&["a", "b", "c"]);
        let normalized = normalize_metric(&nodes, &vector(&[("a", 2.0), ("b", 2.0), ("c", 2.0)]));
        for id in &nodes {
            assert_eq!(normalized[id], 1.0);
        }
    }

    #[test]
    fn missing_nodes_count_as_zero() {
        // values [0, 4]: mean 2, spread 4
        let nodes = ids(&["a", "b"]);
        let normalized = normalize_metric(&nodes, &vector(&[("b", 4.0)]));
        assert_approx_eq(normalized["a"], 0.5);
        assert_approx_eq(normalized["b"], 1.5);
    }

    #[test]
    fn empty_node_set_is_empty() {
        assert!(normalize_metric(&[], &vector(&[("a", 1.0)])).is_empty());
    }

    #[test]
    fn composite_sums_three_metrics() {
        let nodes = ids(&["a", "b"]);
        let centralities = Centralities {
            pagerank: vector(&[("a", 0.0), ("b", 1.0)]),
            eigenvector: vector(&[("a", 1.0), ("b", 1.0)]),
            betweenness: vector(&[("a", 2.0), ("b", 0.0)]),
        };
        let scores = composite_scores(&nodes, &centralities);
        // pagerank: 0.5 / 1.5, eigenvector: 1 / 1, betweenness: 1.5 / 0.5
        assert_approx_eq(scores["a"], 3.0);
        assert_approx_eq(scores["b"], 3.0);
    }

    #[test]
    fn rank_breaks_ties_by_identifier() {
        let scores: ScoreMap = [("b", 2.0), ("c", 3.0), ("a", 2.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let order: Vec<&str> = rank(&scores).into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }
}
