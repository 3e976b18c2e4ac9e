//! Graph assembly from extracted node and edge records

use crate::config::{BuilderConfig, DanglingEdgePolicy};
use crate::{filter, merge};
use beadsmith_core::{Graph, GraphEdge, GraphNode, Result};
use rayon::prelude::*;

/// Records produced by one unit of extraction work (typically one file).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBatch {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl RecordBatch {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        RecordBatch { nodes, edges }
    }
}

/// Entry point for turning records into graphs and combining them.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: BuilderConfig,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        GraphBuilder { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build a graph from records, in input order.
    ///
    /// Nodes are written first, then edges. A duplicate node id or a
    /// duplicate (source, target) pair keeps the first record seen. Edges
    /// pointing outside `nodes` are handled per `config().dangling_edges`.
    pub fn build(&self, nodes: &[GraphNode], edges: &[GraphEdge]) -> Graph {
        let mut graph = Graph::new();
        let mut duplicate_nodes = 0usize;
        let mut duplicate_edges = 0usize;
        let mut dropped_edges = 0usize;

        for node in nodes {
            if !graph.insert_node(node.id.as_str(), node.attributes()) {
                duplicate_nodes += 1;
            }
        }

        for edge in edges {
            if self.config.dangling_edges == DanglingEdgePolicy::Drop
                && !(graph.contains_node(&edge.from_node) && graph.contains_node(&edge.to_node))
            {
                tracing::debug!(
                    "Dropping dangling edge {} -> {}",
                    edge.from_node,
                    edge.to_node
                );
                dropped_edges += 1;
                continue;
            }
            if !graph.insert_edge(edge.from_node.as_str(), edge.to_node.as_str(), edge.attributes()) {
                duplicate_edges += 1;
            }
        }

        tracing::debug!(
            "Built graph: {} nodes ({} placeholders), {} edges; skipped {} duplicate nodes, {} duplicate edges, {} dangling edges",
            graph.node_count(),
            graph.placeholder_count(),
            graph.edge_count(),
            duplicate_nodes,
            duplicate_edges,
            dropped_edges
        );
        graph
    }

    /// Build every batch independently in parallel, then merge the results
    /// in batch order. Same output as building each batch sequentially and
    /// passing the graphs to `merge_graphs` in that order.
    pub fn build_partitioned(&self, batches: &[RecordBatch]) -> Graph {
        let graphs: Vec<Graph> = batches
            .par_iter()
            .map(|batch| self.build(&batch.nodes, &batch.edges))
            .collect();
        merge::merge_graphs(&graphs)
    }

    /// See [`merge::merge_graphs`].
    pub fn merge_graphs(&self, graphs: &[Graph]) -> Graph {
        merge::merge_graphs(graphs)
    }

    /// See [`filter::filter_by_confidence`].
    pub fn filter_by_confidence(&self, graph: &Graph, threshold: &str) -> Result<Graph> {
        filter::filter_by_confidence(graph, threshold)
    }

    /// Filter with the configured `confidence_threshold`.
    pub fn apply_threshold(&self, graph: &Graph) -> Graph {
        filter::retain_min_confidence(graph, self.config.confidence_threshold)
    }
}
