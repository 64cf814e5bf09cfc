//! Community analysis module

pub mod detection;
pub mod metrics;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Mapping from node identifier to community id
pub type CommunityPartition = HashMap<String, usize>;

/// One community of a partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    /// Identifier assigned by the detector
    pub id: usize,

    /// Member identifiers in lexicographic order
    pub members: Vec<String>,
}

/// Invert a partition into communities ordered by id
pub fn group_communities(partition: &CommunityPartition) -> Vec<Community> {
    let mut grouped: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for (node, &community) in partition {
        grouped.entry(community).or_default().push(node.clone());
    }

    grouped
        .into_iter()
        .map(|(id, mut members)| {
            members.sort_unstable();
            Community { id, members }
        })
        .collect()
}
