//! Candidate selection for each role.
//!
//! Exclusion between roles is an explicit set difference against the
//! candidate sets of higher-precedence roles, passed in by name:
//!
//! - organizers: top share of nodes by composite score
//! - gatekeepers: bridge endpoints `\ organizers`
//! - stars: community representatives `\ (organizers ∪ gatekeepers)`
//! - isolates: degree filter, independent of the other three

use std::collections::BTreeSet;

use crate::cluster::metrics::community_representatives;
use crate::cluster::CommunityPartition;
use crate::config::IsolatePolicy;
use crate::graph::algorithms::BridgeEdge;
use crate::graph::UndirectedView;
use crate::metrics::DegreeMap;
use crate::roles::score::{rank, ScoreMap};

/// A set of node identifiers nominated for one role
pub type CandidateSet = BTreeSet<String>;

/// Number of organizers for `node_count` nodes: the share rounded down
pub fn organizer_count(node_count: usize, fraction: f64) -> usize {
    let count = (node_count as f64 * fraction).floor();
    if count <= 0.0 {
        0
    } else {
        (count as usize).min(node_count)
    }
}

/// The highest-scoring nodes, ties broken by smaller identifier
pub fn select_organizers(scores: &ScoreMap, fraction: f64) -> CandidateSet {
    let take = organizer_count(scores.len(), fraction);
    rank(scores)
        .into_iter()
        .take(take)
        .map(|(id, _)| id.to_string())
        .collect()
}

/// Every endpoint of a bridge edge that is not already an organizer
pub fn select_gatekeepers(bridges: &[BridgeEdge], organizers: &CandidateSet) -> CandidateSet {
    let endpoints: CandidateSet = bridges
        .iter()
        .flat_map(|(a, b)| [a.clone(), b.clone()])
        .collect();

    endpoints.difference(organizers).cloned().collect()
}

/// One representative per community, minus organizers and gatekeepers
pub fn select_stars(
    graph: &UndirectedView,
    partition: &CommunityPartition,
    organizers: &CandidateSet,
    gatekeepers: &CandidateSet,
) -> CandidateSet {
    let claimed: CandidateSet = organizers.union(gatekeepers).cloned().collect();

    let representatives: CandidateSet = community_representatives(graph, partition)
        .into_iter()
        .map(|(_, id)| id)
        .collect();

    representatives.difference(&claimed).cloned().collect()
}

/// Nodes whose whole-graph degree the policy admits
pub fn select_isolates(degrees: &DegreeMap, policy: IsolatePolicy) -> CandidateSet {
    degrees
        .iter()
        .filter(|&(_, &degree)| policy.admits(degree))
        .map(|(id, _)| id.clone())
        .collect()
}
