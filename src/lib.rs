//! Beadsmith DAG — assembles extracted code entities and their relationships
//! into a directed graph, merges independently built graphs, and filters
//! edges by confidence.
//!
//! ```text
//! GraphNode[] + GraphEdge[] ──> GraphBuilder::build ──> Graph
//! Graph[]                   ──> merge_graphs        ──> Graph
//! Graph + "medium"          ──> filter_by_confidence ──> Graph
//! ```

pub use beadsmith_builder::{
    filter_by_confidence, merge_graphs, retain_min_confidence, BuilderConfig, DanglingEdgePolicy,
    GraphBuilder, RecordBatch,
};
pub use beadsmith_core::{
    Confidence, EdgeAttributes, EdgeEntry, EdgeKind, Graph, GraphDocument, GraphEdge, GraphError,
    GraphNode, NodeAttributes, NodeEntry, NodeKind, Result,
};
