//! Structural role classification.
//!
//! # Pipeline
//!
//! 1. Centralities (PageRank, eigenvector, betweenness) on the directed view,
//!    normalized and summed into a composite score.
//! 2. **Organizers**: the top share of nodes by composite score.
//! 3. **Gatekeepers**: endpoints of bridge edges, minus organizers.
//! 4. **Stars**: the highest induced-degree member of each community, minus
//!    organizers and gatekeepers.
//! 5. **Isolates**: nodes of degree one (optionally zero).
//! 6. Merge in the order above, later sets overwriting earlier ones.
//!
//! Every stage reads immutable values produced by the stages before it.

pub mod merge;
pub mod score;
pub mod select;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;
use crate::graph::GraphViews;
use crate::metrics::MetricProvider;

use self::merge::merge_roles;
use self::score::{composite_scores, ScoreMap};
use self::select::{
    select_gatekeepers, select_isolates, select_organizers, select_stars, CandidateSet,
};

/// Structural role of a node, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Organizer,
    Gatekeeper,
    Star,
    Isolate,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Organizer, Role::Gatekeeper, Role::Star, Role::Isolate];

    /// Numeric role code: organizer 0, gatekeeper 1, star 2, isolate 3
    pub fn code(self) -> u8 {
        match self {
            Role::Organizer => 0,
            Role::Gatekeeper => 1,
            Role::Star => 2,
            Role::Isolate => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Organizer => "organizer",
            Role::Gatekeeper => "gatekeeper",
            Role::Star => "star",
            Role::Isolate => "isolate",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Final mapping from node identifier to its single role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleAssignment {
    roles: BTreeMap<String, Role>,
}

impl RoleAssignment {
    pub fn get(&self, node: &str) -> Option<Role> {
        self.roles.get(node).copied()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Assignments ordered by node identifier
    pub fn iter(&self) -> impl Iterator<Item = (&str, Role)> {
        self.roles.iter().map(|(node, &role)| (node.as_str(), role))
    }

    /// Nodes holding `role`, in identifier order
    pub fn nodes_with(&self, role: Role) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(move |&(_, assigned)| assigned == role)
            .map(|(node, _)| node)
    }

    pub fn count(&self, role: Role) -> usize {
        self.nodes_with(role).count()
    }
}

impl From<BTreeMap<String, Role>> for RoleAssignment {
    fn from(roles: BTreeMap<String, Role>) -> Self {
        Self { roles }
    }
}

/// The four candidate sets before merging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleCandidates {
    pub organizers: CandidateSet,
    pub gatekeepers: CandidateSet,
    pub stars: CandidateSet,
    pub isolates: CandidateSet,
}

impl RoleCandidates {
    pub fn get(&self, role: Role) -> &CandidateSet {
        match role {
            Role::Organizer => &self.organizers,
            Role::Gatekeeper => &self.gatekeepers,
            Role::Star => &self.stars,
            Role::Isolate => &self.isolates,
        }
    }
}

/// Everything a classification run produced
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Composite importance score of every node
    pub scores: ScoreMap,
    pub candidates: RoleCandidates,
    pub assignment: RoleAssignment,
}

/// Classify every node of `views`, keeping the intermediate results.
///
/// Fails without a partial result if any metric fails. An empty graph yields
/// an empty classification.
pub fn classify<P>(views: &GraphViews, provider: &P, config: &Config) -> Result<Classification>
where
    P: MetricProvider + ?Sized,
{
    if views.is_empty() {
        log::info!("Graph has no nodes; nothing to classify");
        return Ok(Classification::default());
    }

    log::info!("Computing centralities for {} nodes", views.node_count());
    let centralities = provider.centralities(views.directed())?;

    let nodes: Vec<String> = views.node_ids().map(str::to_string).collect();
    let scores = composite_scores(&nodes, &centralities);

    let organizers = select_organizers(&scores, config.organizer_fraction);

    let bridges = provider.bridges(views.undirected());
    let gatekeepers = select_gatekeepers(&bridges, &organizers);

    let partition = provider.communities(views.undirected());
    let stars = select_stars(views.undirected(), &partition, &organizers, &gatekeepers);

    let degrees = provider.degrees(views.undirected());
    let isolates = select_isolates(&degrees, config.isolates);

    log::info!(
        "Candidates: {} organizers, {} gatekeepers ({} bridges), {} stars, {} isolates",
        organizers.len(),
        gatekeepers.len(),
        bridges.len(),
        stars.len(),
        isolates.len()
    );

    let candidates = RoleCandidates {
        organizers,
        gatekeepers,
        stars,
        isolates,
    };
    let assignment = merge_roles(&candidates);

    log::info!(
        "Assigned roles to {} of {} nodes",
        assignment.len(),
        views.node_count()
    );

    Ok(Classification {
        scores,
        candidates,
        assignment,
    })
}

/// Classify every node of `views` into at most one role
pub fn classify_roles<P>(views: &GraphViews, provider: &P, config: &Config) -> Result<RoleAssignment>
where
    P: MetricProvider + ?Sized,
{
    classify(views, provider, config).map(|classification| classification.assignment)
}
