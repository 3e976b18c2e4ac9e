//! Deterministic merging of independently built graphs

use beadsmith_core::Graph;

/// Fold `graphs` left to right into a new graph.
///
/// The result holds the union of node ids and of (source, target) pairs.
/// When two inputs define the same node id, the earlier input's attribute
/// set is kept whole and the later one is discarded; edges collide the same
/// way by ordered pair. A placeholder node is filled in by the first real
/// attribute set seen for its id. Inputs are left untouched.
pub fn merge_graphs<'a, I>(graphs: I) -> Graph
where
    I: IntoIterator<Item = &'a Graph>,
{
    let mut merged = Graph::new();
    let mut inputs = 0usize;
    let mut node_collisions = 0usize;
    let mut edge_collisions = 0usize;

    for graph in graphs {
        inputs += 1;

        for entry in graph.nodes() {
            let real = !entry.is_placeholder();
            if !merged.insert_node_entry(entry.clone()) && real {
                node_collisions += 1;
            }
        }

        for edge in graph.edges() {
            if !merged.insert_edge(
                edge.source.as_str(),
                edge.target.as_str(),
                edge.attributes.clone(),
            ) {
                edge_collisions += 1;
            }
        }
    }

    tracing::debug!(
        "Merged {} graphs: {} nodes, {} edges; {} node collisions, {} edge collisions",
        inputs,
        merged.node_count(),
        merged.edge_count(),
        node_collisions,
        edge_collisions
    );
    merged
}
