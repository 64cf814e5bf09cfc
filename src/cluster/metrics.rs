//! Per-community statistics

use std::collections::HashMap;

use petgraph::visit::EdgeRef;

use crate::cluster::{group_communities, CommunityPartition};
use crate::graph::UndirectedView;

/// Degree of each partitioned node inside the subgraph induced by its own
/// community. A self-loop counts twice, as in the whole-graph degree.
pub fn induced_degrees(
    graph: &UndirectedView,
    partition: &CommunityPartition,
) -> HashMap<String, usize> {
    let mut counts = vec![0usize; graph.node_count()];

    for edge in graph.edge_references() {
        let a = edge.source();
        let b = edge.target();
        match (partition.get(&graph[a]), partition.get(&graph[b])) {
            (Some(ca), Some(cb)) if ca == cb => {
                counts[a.index()] += 1;
                counts[b.index()] += 1;
            }
            _ => {}
        }
    }

    graph
        .node_indices()
        .filter(|&idx| partition.contains_key(&graph[idx]))
        .map(|idx| (graph[idx].clone(), counts[idx.index()]))
        .collect()
}

/// Pick the most connected member of every community.
///
/// The representative has the highest induced degree; ties go to the
/// lexicographically smallest identifier. A singleton community is
/// represented by its only member. Results are ordered by community id.
pub fn community_representatives(
    graph: &UndirectedView,
    partition: &CommunityPartition,
) -> Vec<(usize, String)> {
    let degrees = induced_degrees(graph, partition);

    group_communities(partition)
        .into_iter()
        .filter_map(|community| {
            // Members are sorted, so the first maximum is the smallest id
            let mut best: Option<(&String, usize)> = None;
            for member in &community.members {
                let degree = degrees.get(member).copied().unwrap_or(0);
                if best.map_or(true, |(_, top)| degree > top) {
                    best = Some((member, degree));
                }
            }
            best.map(|(member, _)| (community.id, member.clone()))
        })
        .collect()
}
