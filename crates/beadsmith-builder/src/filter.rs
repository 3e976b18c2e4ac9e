//! Confidence-threshold filtering

use beadsmith_core::{Confidence, Graph, Result};

/// Keep every node and only the edges whose confidence is at least
/// `threshold` (a tier name, case-insensitive).
///
/// An unknown tier name is `GraphError::InvalidArgument`; no graph is
/// produced in that case.
pub fn filter_by_confidence(graph: &Graph, threshold: &str) -> Result<Graph> {
    let min: Confidence = threshold.parse()?;
    Ok(retain_min_confidence(graph, min))
}

/// Typed form of [`filter_by_confidence`].
pub fn retain_min_confidence(graph: &Graph, min: Confidence) -> Graph {
    let mut filtered = Graph::new();
    for entry in graph.nodes() {
        filtered.insert_node_entry(entry.clone());
    }

    let mut removed = 0usize;
    for edge in graph.edges() {
        if edge.attributes.confidence < min {
            removed += 1;
            continue;
        }
        filtered.insert_edge(
            edge.source.as_str(),
            edge.target.as_str(),
            edge.attributes.clone(),
        );
    }

    tracing::debug!(
        "Filtered graph at {}: kept {} of {} edges",
        min,
        filtered.edge_count(),
        filtered.edge_count() + removed
    );
    filtered
}
