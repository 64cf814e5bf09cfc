//! Raw per-node metrics and the structural facts the role selectors consume.
//!
//! # Overview
//!
//! [`MetricProvider`] is the seam between the classification pipeline and the
//! graph algorithms it treats as black boxes:
//!
//! - **Centralities** on the directed view: PageRank, eigenvector centrality
//!   and betweenness centrality.
//! - **Structure** on the undirected view: bridge edges, a community
//!   partition and node degrees.
//!
//! [`StandardMetrics`] implements it with the algorithms in this crate.
//! Alternative providers (precomputed scores, test doubles) only need to
//! honour the same contracts: every returned vector covers the view's full
//! node set and non-convergence is an error, never a partial result.

pub mod betweenness;
pub mod eigenvector;
pub mod pagerank;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cluster::detection::louvain;
use crate::cluster::CommunityPartition;
use crate::config::{Config, EigenvectorConfig, LouvainConfig, PageRankConfig};
use crate::error::ConvergenceError;
use crate::graph::algorithms::{self, BridgeEdge};
use crate::graph::{DirectedView, UndirectedView};

/// Mapping from node identifier to one raw metric value
pub type MetricVector = HashMap<String, f64>;

/// Mapping from node identifier to its number of incident edges
pub type DegreeMap = HashMap<String, usize>;

/// The centrality metrics combined into the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    PageRank,
    Eigenvector,
    Betweenness,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [
        MetricKind::PageRank,
        MetricKind::Eigenvector,
        MetricKind::Betweenness,
    ];
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricKind::PageRank => "PageRank",
            MetricKind::Eigenvector => "eigenvector centrality",
            MetricKind::Betweenness => "betweenness centrality",
        };
        f.write_str(name)
    }
}

/// Raw centrality vectors for one directed view
#[derive(Debug, Clone, Default)]
pub struct Centralities {
    pub pagerank: MetricVector,
    pub eigenvector: MetricVector,
    pub betweenness: MetricVector,
}

impl Centralities {
    pub fn get(&self, kind: MetricKind) -> &MetricVector {
        match kind {
            MetricKind::PageRank => &self.pagerank,
            MetricKind::Eigenvector => &self.eigenvector,
            MetricKind::Betweenness => &self.betweenness,
        }
    }
}

/// Source of every metric and structural fact the classifier reads
pub trait MetricProvider: Sync {
    fn pagerank(&self, graph: &DirectedView) -> Result<MetricVector, ConvergenceError>;

    fn eigenvector_centrality(&self, graph: &DirectedView)
        -> Result<MetricVector, ConvergenceError>;

    fn betweenness_centrality(&self, graph: &DirectedView)
        -> Result<MetricVector, ConvergenceError>;

    fn bridges(&self, graph: &UndirectedView) -> Vec<BridgeEdge>;

    fn communities(&self, graph: &UndirectedView) -> CommunityPartition;

    fn degrees(&self, graph: &UndirectedView) -> DegreeMap;

    /// Compute the three centralities concurrently.
    ///
    /// They are independent reads of the same immutable graph; all three
    /// finish before this returns. When more than one fails, the PageRank
    /// error wins, then eigenvector.
    fn centralities(&self, graph: &DirectedView) -> Result<Centralities, ConvergenceError> {
        let (pagerank, (eigenvector, betweenness)) = rayon::join(
            || self.pagerank(graph),
            || {
                rayon::join(
                    || self.eigenvector_centrality(graph),
                    || self.betweenness_centrality(graph),
                )
            },
        );

        Ok(Centralities {
            pagerank: pagerank?,
            eigenvector: eigenvector?,
            betweenness: betweenness?,
        })
    }
}

/// [`MetricProvider`] backed by this crate's own algorithms
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StandardMetrics {
    pub pagerank: PageRankConfig,
    pub eigenvector: EigenvectorConfig,
    pub louvain: LouvainConfig,
}

impl StandardMetrics {
    pub fn from_config(config: &Config) -> Self {
        Self {
            pagerank: config.pagerank,
            eigenvector: config.eigenvector,
            louvain: config.louvain,
        }
    }
}

impl MetricProvider for StandardMetrics {
    fn pagerank(&self, graph: &DirectedView) -> Result<MetricVector, ConvergenceError> {
        pagerank::pagerank(graph, &self.pagerank)
    }

    fn eigenvector_centrality(
        &self,
        graph: &DirectedView,
    ) -> Result<MetricVector, ConvergenceError> {
        eigenvector::eigenvector_centrality(graph, &self.eigenvector)
    }

    fn betweenness_centrality(
        &self,
        graph: &DirectedView,
    ) -> Result<MetricVector, ConvergenceError> {
        Ok(betweenness::betweenness_centrality(graph))
    }

    fn bridges(&self, graph: &UndirectedView) -> Vec<BridgeEdge> {
        algorithms::find_bridges(graph)
    }

    fn communities(&self, graph: &UndirectedView) -> CommunityPartition {
        louvain(graph, &self.louvain)
    }

    fn degrees(&self, graph: &UndirectedView) -> DegreeMap {
        algorithms::degrees(graph)
    }
}
