//! Community detection by multi-level Louvain modularity optimization

use std::collections::BTreeMap;

use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::cluster::CommunityPartition;
use crate::config::LouvainConfig;
use crate::graph::UndirectedView;

/// Weighted graph at one aggregation level.
///
/// Node `i` of a level is community `i` of the level below it.
struct Level {
    /// Neighbours and edge weights, self-loops excluded
    adjacency: Vec<Vec<(usize, f64)>>,

    /// Self-loop weight per node
    loops: Vec<f64>,

    /// Weighted degree; a self-loop counts twice
    degree: Vec<f64>,

    /// Sum of all edge weights (`m`)
    total_weight: f64,
}

impl Level {
    fn from_view(graph: &UndirectedView) -> Self {
        let n = graph.node_count();
        let mut adjacency = vec![Vec::new(); n];
        let mut loops = vec![0.0; n];

        for edge in graph.edge_references() {
            let a = edge.source().index();
            let b = edge.target().index();
            let w = *edge.weight();
            if a == b {
                loops[a] += w;
            } else {
                adjacency[a].push((b, w));
                adjacency[b].push((a, w));
            }
        }

        Self::new(adjacency, loops)
    }

    fn new(adjacency: Vec<Vec<(usize, f64)>>, loops: Vec<f64>) -> Self {
        let degree: Vec<f64> = adjacency
            .iter()
            .zip(&loops)
            .map(|(neighbors, &own)| neighbors.iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * own)
            .collect();
        let total_weight = degree.iter().sum::<f64>() / 2.0;

        Self {
            adjacency,
            loops,
            degree,
            total_weight,
        }
    }

    fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Collapse each community into a single node
    fn aggregate(&self, communities: &[usize], count: usize) -> Self {
        let mut weights: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); count];
        let mut loops = vec![0.0; count];

        for (node, neighbors) in self.adjacency.iter().enumerate() {
            let ci = communities[node];
            loops[ci] += self.loops[node];
            for &(other, w) in neighbors {
                let cj = communities[other];
                if ci == cj {
                    // Internal edges are visited from both ends
                    loops[ci] += w / 2.0;
                } else {
                    *weights[ci].entry(cj).or_insert(0.0) += w;
                }
            }
        }

        let adjacency: Vec<Vec<(usize, f64)>> = weights
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect();

        Self::new(adjacency, loops)
    }
}

/// Community bookkeeping for one level
struct Status {
    community: Vec<usize>,

    /// Total degree of each community
    tot: Vec<f64>,

    /// Internal edge weight of each community, each edge counted once
    internal: Vec<f64>,
}

impl Status {
    fn singletons(level: &Level) -> Self {
        Self {
            community: (0..level.len()).collect(),
            tot: level.degree.clone(),
            internal: level.loops.clone(),
        }
    }

    fn modularity(&self, level: &Level, resolution: f64) -> f64 {
        let m = level.total_weight;
        self.internal
            .iter()
            .zip(&self.tot)
            .map(|(&inside, &tot)| inside / m - resolution * (tot / (2.0 * m)).powi(2))
            .sum()
    }
}

/// Repeatedly move single nodes to the neighbouring community with the best
/// modularity gain until a full pass gains less than `min_gain`.
fn one_level(level: &Level, status: &mut Status, config: &LouvainConfig, rng: &mut StdRng) {
    let m = level.total_weight;
    let mut order: Vec<usize> = (0..level.len()).collect();
    let mut current = status.modularity(level, config.resolution);

    loop {
        let mut moved = false;
        order.shuffle(rng);

        for &node in &order {
            let own = status.community[node];
            let k = level.degree[node];
            let share = k / (2.0 * m);

            let mut neighbor_weights: BTreeMap<usize, f64> = BTreeMap::new();
            for &(other, w) in &level.adjacency[node] {
                *neighbor_weights.entry(status.community[other]).or_insert(0.0) += w;
            }
            let weight_to_own = neighbor_weights.get(&own).copied().unwrap_or(0.0);

            status.tot[own] -= k;
            status.internal[own] -= weight_to_own + level.loops[node];

            let remove_cost = -weight_to_own + config.resolution * status.tot[own] * share;
            let mut best = own;
            let mut best_increase = 0.0;
            for (&candidate, &w) in &neighbor_weights {
                let increase =
                    remove_cost + w - config.resolution * status.tot[candidate] * share;
                if increase > best_increase {
                    best_increase = increase;
                    best = candidate;
                }
            }

            let weight_to_best = neighbor_weights.get(&best).copied().unwrap_or(0.0);
            status.community[node] = best;
            status.tot[best] += k;
            status.internal[best] += weight_to_best + level.loops[node];

            if best != own {
                moved = true;
            }
        }

        let updated = status.modularity(level, config.resolution);
        if !moved || updated - current < config.min_gain {
            break;
        }
        current = updated;
    }
}

/// Relabel communities densely from 0 in order of first appearance
fn renumber(community: &[usize]) -> (Vec<usize>, usize) {
    let mut relabel: BTreeMap<usize, usize> = BTreeMap::new();
    let assignment = community
        .iter()
        .map(|&c| {
            let next = relabel.len();
            *relabel.entry(c).or_insert(next)
        })
        .collect();
    (assignment, relabel.len())
}

/// Partition the undirected view into communities with the Louvain method.
///
/// The node visiting order is shuffled from `config.seed`, so one seed always
/// yields the same partition for the same graph. A graph without (positively
/// weighted) edges puts every node in its own community.
pub fn louvain(graph: &UndirectedView, config: &LouvainConfig) -> CommunityPartition {
    let n = graph.node_count();
    let mut level = Level::from_view(graph);

    if level.total_weight <= 0.0 {
        return graph
            .node_indices()
            .map(|idx| (graph[idx].clone(), idx.index()))
            .collect();
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut membership: Vec<usize> = (0..n).collect();
    let mut best_modularity = f64::NEG_INFINITY;
    let mut levels = 0;

    loop {
        let mut status = Status::singletons(&level);
        one_level(&level, &mut status, config, &mut rng);
        let modularity = status.modularity(&level, config.resolution);

        // The first level is always kept
        if levels > 0 && modularity - best_modularity < config.min_gain {
            break;
        }
        best_modularity = modularity;
        levels += 1;

        let (assignment, count) = renumber(&status.community);
        for community in &mut membership {
            *community = assignment[*community];
        }

        if count == level.len() {
            break;
        }
        level = level.aggregate(&assignment, count);
    }

    log::debug!(
        "Louvain: {} levels, modularity {:.4}",
        levels,
        best_modularity
    );

    graph
        .node_indices()
        .map(|idx| (graph[idx].clone(), membership[idx.index()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::group_communities;
    use crate::graph::{GraphBuilder, GraphViews};

    fn undirected(edges: &[(&str, &str)]) -> UndirectedView {
        GraphViews::from_edges(edges.iter().map(|&(a, b)| (a, b, 1.0)))
            .unwrap()
            .undirected()
            .clone()
    }

    fn clique(prefix: &str, size: usize) -> Vec<(String, String)> {
        let mut edges = Vec::new();
        for i in 0..size {
            for j in (i + 1)..size {
                edges.push((format!("{prefix}{i}"), format!("{prefix}{j}")));
            }
        }
        edges
    }

    #[test]
    fn empty_graph_has_no_communities() {
        let partition = louvain(&UndirectedView::default(), &LouvainConfig::default());
        assert!(partition.is_empty());
    }

    #[test]
    fn edgeless_nodes_are_singletons() {
        let mut builder = GraphBuilder::with_capacity(3);
        for id in ["a", "b", "c"] {
            builder.add_node(id);
        }
        let views = builder.build().unwrap();
        let partition = louvain(views.undirected(), &LouvainConfig::default());
        assert_eq!(group_communities(&partition).len(), 3);
    }

    #[test]
    fn disjoint_edges_form_one_community_each() {
        let graph = undirected(&[("a", "b"), ("c", "d"), ("e", "f")]);
        let partition = louvain(&graph, &LouvainConfig::default());

        assert_eq!(partition["a"], partition["b"]);
        assert_eq!(partition["c"], partition["d"]);
        assert_eq!(partition["e"], partition["f"]);
        assert_eq!(group_communities(&partition).len(), 3);
    }

    #[test]
    fn two_cliques_joined_by_one_edge_split() {
        let mut edges = clique("l", 5);
        edges.extend(clique("r", 5));
        edges.push(("l0".to_string(), "r0".to_string()));
        let borrowed: Vec<(&str, &str)> = edges
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();

        let partition = louvain(&undirected(&borrowed), &LouvainConfig::default());

        assert_eq!(group_communities(&partition).len(), 2);
        for i in 1..5 {
            assert_eq!(partition[&format!("l{i}")], partition["l0"]);
            assert_eq!(partition[&format!("r{i}")], partition["r0"]);
        }
        assert_ne!(partition["l0"], partition["r0"]);
    }

    #[test]
    fn complete_graph_is_one_community() {
        let edges = clique("n", 6);
        let borrowed: Vec<(&str, &str)> = edges
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        let partition = louvain(&undirected(&borrowed), &LouvainConfig::default());
        assert_eq!(group_communities(&partition).len(), 1);
    }

    #[test]
    fn same_seed_same_partition() {
        let graph = undirected(&[
            ("a", "b"),
            ("b", "c"),
            ("c", "a"),
            ("c", "d"),
            ("d", "e"),
            ("e", "f"),
            ("f", "d"),
            ("f", "g"),
        ]);
        let config = LouvainConfig {
            seed: 42,
            ..LouvainConfig::default()
        };
        assert_eq!(louvain(&graph, &config), louvain(&graph, &config));
    }

    #[test]
    fn ids_are_dense() {
        let graph = undirected(&[("a", "b"), ("c", "d"), ("e", "f"), ("g", "h")]);
        let partition = louvain(&graph, &LouvainConfig::default());
        let mut ids: Vec<usize> = partition.values().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }
}
