//! Record fixtures for builder tests

use beadsmith_core::{Confidence, EdgeKind, GraphEdge, GraphNode, NodeKind};

/// Route `tracing` output through the test harness. Set `RUST_LOG` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn file_node(path: &str, docstring: &str) -> GraphNode {
    GraphNode::new(format!("file:{}", path), NodeKind::File, path, 0, path).with_docstring(docstring)
}

/// A function node in `test.py` whose id is also its name.
pub fn function_node(id: &str, line_number: u32) -> GraphNode {
    GraphNode::new(id, NodeKind::Function, "test.py", line_number, id)
}

pub fn call_edge(from: &str, to: &str, confidence: Confidence) -> GraphEdge {
    GraphEdge::new(from, to, EdgeKind::Call, confidence).with_label("test")
}

/// `node1` plus one `node1 -> nodeN` call per given tier, in order.
pub fn fan_out(tiers: &[Confidence]) -> (Vec<GraphNode>, Vec<GraphEdge>) {
    let mut nodes = vec![function_node("node1", 1)];
    let mut edges = Vec::new();
    for (i, &tier) in tiers.iter().enumerate() {
        let target = format!("node{}", i + 2);
        nodes.push(function_node(&target, i as u32 + 2));
        edges.push(call_edge("node1", &target, tier));
    }
    (nodes, edges)
}

/// Sorted `(source, target)` pairs of a graph's edges.
pub fn edge_pairs(graph: &beadsmith_core::Graph) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = graph
        .edges()
        .map(|e| (e.source.clone(), e.target.clone()))
        .collect();
    pairs.sort();
    pairs
}
