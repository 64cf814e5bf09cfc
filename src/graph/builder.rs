//! Graph construction module

use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use crate::error::Result;
use crate::graph::{DirectedView, GraphViews, UndirectedView};

/// Builder for incrementally constructing both graph views in lockstep
pub struct GraphBuilder {
    /// Mapping from string IDs to node indices (identical in both views)
    id_to_index: HashMap<String, NodeIndex>,

    /// Directed weighted view
    directed: DirectedView,

    /// Undirected weighted view
    undirected: UndirectedView,
}

impl GraphBuilder {
    /// Create a new graph builder with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            directed: DirectedView::with_capacity(capacity, capacity),
            undirected: UndirectedView::with_capacity(capacity, capacity),
        }
    }

    /// Get or create the node for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.directed.add_node(id.to_string());
        let mirrored = self.undirected.add_node(id.to_string());
        debug_assert_eq!(idx, mirrored);
        self.id_to_index.insert(id.to_string(), idx);

        idx
    }

    /// Add a node without edges
    pub fn add_node(&mut self, id: &str) {
        self.get_or_create_node(id);
    }

    /// Add a weighted edge; repeating a pair replaces its weight
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str, weight: f64) {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);

        self.directed.update_edge(src_idx, dst_idx, weight);
        self.undirected.update_edge(src_idx, dst_idx, weight);
    }

    pub fn node_count(&self) -> usize {
        self.id_to_index.len()
    }

    /// Finish both views
    pub fn build(self) -> Result<GraphViews> {
        log::debug!(
            "Built graph views: {} nodes, {} directed edges, {} undirected edges",
            self.directed.node_count(),
            self.directed.edge_count(),
            self.undirected.edge_count()
        );
        GraphViews::new(self.directed, self.undirected)
    }
}
