//! Shared fixtures for the integration tests

#![allow(dead_code)]

use org_roles::cluster::CommunityPartition;
use org_roles::graph::algorithms::BridgeEdge;
use org_roles::graph::{DirectedView, GraphBuilder, GraphViews, UndirectedView};
use org_roles::metrics::{DegreeMap, MetricProvider, MetricVector, StandardMetrics};
use org_roles::ConvergenceError;

/// Build views from `(source, target)` pairs with unit weight, adding each
/// edge in both directions so the directed view is strongly connected
/// wherever the undirected one is connected.
pub fn reciprocal(edges: &[(&str, &str)]) -> GraphViews {
    let mut builder = GraphBuilder::with_capacity(edges.len() * 2);
    for &(a, b) in edges {
        builder.add_edge(a, b, 1.0);
        builder.add_edge(b, a, 1.0);
    }
    builder.build().unwrap()
}

/// Provider with fixed centrality scores and an optional fixed partition;
/// bridges and degrees come from the standard algorithms
pub struct ScriptedMetrics {
    pub scores: MetricVector,
    pub partition: Option<CommunityPartition>,
    pub standard: StandardMetrics,
}

impl ScriptedMetrics {
    pub fn new(scores: MetricVector) -> Self {
        Self {
            scores,
            partition: None,
            standard: StandardMetrics::default(),
        }
    }

    pub fn with_partition(mut self, partition: CommunityPartition) -> Self {
        self.partition = Some(partition);
        self
    }
}

impl MetricProvider for ScriptedMetrics {
    fn pagerank(&self, _graph: &DirectedView) -> Result<MetricVector, ConvergenceError> {
        Ok(self.scores.clone())
    }

    fn eigenvector_centrality(
        &self,
        _graph: &DirectedView,
    ) -> Result<MetricVector, ConvergenceError> {
        Ok(self.scores.clone())
    }

    fn betweenness_centrality(
        &self,
        _graph: &DirectedView,
    ) -> Result<MetricVector, ConvergenceError> {
        Ok(self.scores.clone())
    }

    fn bridges(&self, graph: &UndirectedView) -> Vec<BridgeEdge> {
        self.standard.bridges(graph)
    }

    fn communities(&self, graph: &UndirectedView) -> CommunityPartition {
        match &self.partition {
            Some(partition) => partition.clone(),
            None => self.standard.communities(graph),
        }
    }

    fn degrees(&self, graph: &UndirectedView) -> DegreeMap {
        self.standard.degrees(graph)
    }
}

/// Provider that never fails: every centrality is the node's degree in the
/// undirected sense of the directed view
pub struct DegreeCentrality {
    pub standard: StandardMetrics,
}

impl DegreeCentrality {
    pub fn new() -> Self {
        Self {
            standard: StandardMetrics::default(),
        }
    }

    fn degree_vector(graph: &DirectedView) -> MetricVector {
        graph
            .node_indices()
            .map(|idx| {
                let degree = graph.neighbors_undirected(idx).count();
                (graph[idx].clone(), degree as f64)
            })
            .collect()
    }
}

impl MetricProvider for DegreeCentrality {
    fn pagerank(&self, graph: &DirectedView) -> Result<MetricVector, ConvergenceError> {
        Ok(Self::degree_vector(graph))
    }

    fn eigenvector_centrality(
        &self,
        graph: &DirectedView,
    ) -> Result<MetricVector, ConvergenceError> {
        Ok(Self::degree_vector(graph))
    }

    fn betweenness_centrality(
        &self,
        graph: &DirectedView,
    ) -> Result<MetricVector, ConvergenceError> {
        self.standard.betweenness_centrality(graph)
    }

    fn bridges(&self, graph: &UndirectedView) -> Vec<BridgeEdge> {
        self.standard.bridges(graph)
    }

    fn communities(&self, graph: &UndirectedView) -> CommunityPartition {
        self.standard.communities(graph)
    }

    fn degrees(&self, graph: &UndirectedView) -> DegreeMap {
        self.standard.degrees(graph)
    }
}
