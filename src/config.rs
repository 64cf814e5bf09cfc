//! Configuration management for the role classifier

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Which degrees qualify a node as an isolate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolatePolicy {
    /// Only nodes with exactly one incident edge.
    #[default]
    DegreeOne,
    /// Nodes with no incident edges as well as degree-one nodes.
    DegreeZeroOrOne,
}

impl IsolatePolicy {
    pub fn admits(self, degree: usize) -> bool {
        match self {
            Self::DegreeOne => degree == 1,
            Self::DegreeZeroOrOne => degree <= 1,
        }
    }
}

/// PageRank power-iteration settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Probability of following a link rather than teleporting
    pub damping: f64,

    /// Per-node L1 tolerance; the run stops once the total change is below `node_count * tolerance`
    pub tolerance: f64,

    /// Iterations allowed before giving up
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

/// Eigenvector centrality power-iteration settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EigenvectorConfig {
    pub tolerance: f64,
    pub max_iter: usize,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

/// Louvain community detection settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LouvainConfig {
    /// Seed for the node visiting order
    pub seed: u64,

    /// Modularity resolution; values above 1 favour smaller communities
    pub resolution: f64,

    /// Minimum modularity gain for another pass or level to be kept
    pub min_gain: f64,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            resolution: 1.0,
            min_gain: 1e-7,
        }
    }
}

/// Top-level configuration for a classification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Share of nodes (rounded down) promoted to organizer
    pub organizer_fraction: f64,

    pub pagerank: PageRankConfig,

    pub eigenvector: EigenvectorConfig,

    pub louvain: LouvainConfig,

    pub isolates: IsolatePolicy,

    /// Field separator of the edge list
    pub delimiter: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            organizer_fraction: 0.10,
            pagerank: PageRankConfig::default(),
            eigenvector: EigenvectorConfig::default(),
            louvain: LouvainConfig::default(),
            isolates: IsolatePolicy::default(),
            delimiter: ',',
        }
    }
}

impl Config {
    /// Read a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// The delimiter as the single byte the CSV reader splits on
    pub fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter {:?} is not an ASCII character", self.delimiter);
        }
        Ok(self.delimiter as u8)
    }
}
