//! Directed and undirected views over one node population

use std::collections::HashSet;

use petgraph::graph::{DiGraph, UnGraph};

use crate::error::{Result, RoleError};
use crate::graph::GraphBuilder;

/// Weighted directed view, used by the centrality metrics
pub type DirectedView = DiGraph<String, f64>;

/// Weighted undirected view, used for bridges, communities and degree
pub type UndirectedView = UnGraph<String, f64>;

/// The pair of views every classification run reads from.
///
/// Both views always hold the same set of node identifiers. Views built by
/// [`GraphBuilder`] also share node indices, but callers handing in their own
/// graphs only get the node-set guarantee.
#[derive(Debug, Clone, Default)]
pub struct GraphViews {
    directed: DirectedView,
    undirected: UndirectedView,
}

impl GraphViews {
    /// Pair two views, rejecting them if their node sets differ
    pub fn new(directed: DirectedView, undirected: UndirectedView) -> Result<Self> {
        if directed.node_count() != undirected.node_count() {
            return Err(RoleError::ViewMismatch(format!(
                "{} directed nodes vs {} undirected nodes",
                directed.node_count(),
                undirected.node_count()
            )));
        }

        let directed_ids: HashSet<&str> = directed.node_weights().map(String::as_str).collect();
        if directed_ids.len() != directed.node_count() {
            return Err(RoleError::ViewMismatch(
                "directed view repeats a node identifier".to_string(),
            ));
        }

        let undirected_ids: HashSet<&str> = undirected.node_weights().map(String::as_str).collect();
        if undirected_ids.len() != undirected.node_count() {
            return Err(RoleError::ViewMismatch(
                "undirected view repeats a node identifier".to_string(),
            ));
        }

        if let Some(missing) = undirected_ids.difference(&directed_ids).min() {
            return Err(RoleError::ViewMismatch(format!(
                "node {missing:?} is missing from the directed view"
            )));
        }

        Ok(Self {
            directed,
            undirected,
        })
    }

    /// Build both views from `(source, target, weight)` triples
    pub fn from_edges<'a, I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str, f64)>,
    {
        let mut builder = GraphBuilder::with_capacity(0);
        for (src, dst, weight) in edges {
            builder.add_edge(src, dst, weight);
        }
        builder.build()
    }

    pub fn directed(&self) -> &DirectedView {
        &self.directed
    }

    pub fn undirected(&self) -> &UndirectedView {
        &self.undirected
    }

    pub fn node_count(&self) -> usize {
        self.directed.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Edge counts as `(directed, undirected)`
    pub fn edge_count(&self) -> (usize, usize) {
        (self.directed.edge_count(), self.undirected.edge_count())
    }

    /// Node identifiers in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.directed.node_weights().map(String::as_str)
    }
}
