//! Integration tests for Beadsmith DAG
//!
//! These tests drive the full records -> build -> merge -> filter pipeline
//! through the facade crate.

use beadsmith_dag::*;
use std::path::Path;

/// Records as the extraction phase would hand them over for one file.
fn extract_main_py() -> RecordBatch {
    let path = Path::new("app/main.py");
    let file_id = GraphNode::compose_id(NodeKind::File, path, "main.py");
    let main_id = GraphNode::compose_id(NodeKind::Function, path, "main");
    let greet_id = "function:app/greet.py:greet".to_string();

    let nodes = vec![
        GraphNode::new(file_id.as_str(), NodeKind::File, path, 0, "main.py"),
        GraphNode::new(main_id.as_str(), NodeKind::Function, path, 3, "main").with_return_type("None"),
    ];
    let edges = vec![
        GraphEdge::new(file_id.as_str(), "file:app/greet.py", EdgeKind::Import, Confidence::High)
            .at_line(1)
            .with_label("import greet"),
        GraphEdge::new(main_id.as_str(), greet_id.as_str(), EdgeKind::Call, Confidence::Medium)
            .at_line(4)
            .with_label("calls greet()"),
        GraphEdge::new(main_id.as_str(), "function:app/main.py:log", EdgeKind::Call, Confidence::Unsafe)
            .at_line(5)
            .with_label("dynamic call"),
    ];
    RecordBatch::new(nodes, edges)
}

fn extract_greet_py() -> RecordBatch {
    let path = Path::new("app/greet.py");
    let nodes = vec![
        GraphNode::new("file:app/greet.py", NodeKind::File, path, 0, "greet.py").with_docstring("Greetings"),
        GraphNode::new("class:app/greet.py:Greeter", NodeKind::Class, path, 2, "Greeter"),
        GraphNode::new("function:app/greet.py:greet", NodeKind::Function, path, 10, "greet")
            .with_parameters(["name"])
            .with_return_type("str"),
    ];
    let edges = vec![
        GraphEdge::new("class:app/greet.py:Greeter", "class:app/base.py:Base", EdgeKind::Inherits, Confidence::Low)
            .at_line(2)
            .with_label("Greeter(Base)"),
    ];
    RecordBatch::new(nodes, edges)
}

#[test]
fn test_pipeline_build_merge_filter() {
    let builder = GraphBuilder::new();
    let batches = [extract_main_py(), extract_greet_py()];

    let graphs: Vec<Graph> = batches
        .iter()
        .map(|b| builder.build(&b.nodes, &b.edges))
        .collect();
    let merged = builder.merge_graphs(&graphs);

    // imported file and called function are now real nodes
    assert!(!merged.is_placeholder("file:app/greet.py"));
    assert_eq!(
        merged.node("function:app/greet.py:greet").unwrap().parameters,
        vec!["name".to_string()]
    );
    // nothing ever defined these
    assert!(merged.is_placeholder("function:app/main.py:log"));
    assert!(merged.is_placeholder("class:app/base.py:Base"));
    assert_eq!(merged.node_count(), 7);
    assert_eq!(merged.edge_count(), 4);

    let medium = builder.filter_by_confidence(&merged, "medium").unwrap();
    assert_eq!(medium.node_count(), merged.node_count());
    assert_eq!(medium.edge_count(), 2);
    assert!(medium.has_edge("function:app/main.py:main", "function:app/greet.py:greet"));
    assert!(!medium.has_edge("class:app/greet.py:Greeter", "class:app/base.py:Base"));

    assert!(matches!(
        builder.filter_by_confidence(&merged, "very-high"),
        Err(GraphError::InvalidArgument(_))
    ));
}

#[test]
fn test_partitioned_build_matches_pipeline() {
    let builder = GraphBuilder::new();
    let batches = vec![extract_main_py(), extract_greet_py()];

    let graphs: Vec<Graph> = batches
        .iter()
        .map(|b| builder.build(&b.nodes, &b.edges))
        .collect();
    assert_eq!(builder.build_partitioned(&batches), merge_graphs(&graphs));
}

#[test]
fn test_serialized_output_is_stable() {
    let builder = GraphBuilder::new();
    let batches = vec![extract_main_py(), extract_greet_py()];

    let first = serde_json::to_string_pretty(&builder.build_partitioned(&batches)).unwrap();
    for _ in 0..5 {
        let again = serde_json::to_string_pretty(&builder.build_partitioned(&batches)).unwrap();
        assert_eq!(first, again);
    }

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    let greet = value["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["id"] == "function:app/greet.py:greet")
        .unwrap();
    assert_eq!(greet["type"], "function");
    assert_eq!(greet["line_number"], 10);
    assert_eq!(greet["return_type"], "str");
    assert!(greet.get("docstring").is_none());

    let restored: Graph = serde_json::from_str(&first).unwrap();
    assert_eq!(serde_json::to_string_pretty(&restored).unwrap(), first);
}

#[test]
fn test_configured_builder_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("beadsmith.toml");
    std::fs::write(&path, "dangling_edges = \"drop\"\nconfidence_threshold = \"low\"\n").unwrap();

    let builder = GraphBuilder::with_config(BuilderConfig::from_file(&path).unwrap());
    let batch = extract_main_py();
    let graph = builder.build(&batch.nodes, &batch.edges);

    // every edge of main.py points outside the file
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(builder.apply_threshold(&graph), graph);
}

#[test]
fn test_petgraph_export_supports_analysis() {
    let builder = GraphBuilder::new();
    let merged = builder.build_partitioned(&[extract_main_py(), extract_greet_py()]);
    let digraph = merged.to_petgraph();

    assert_eq!(digraph.node_count(), merged.node_count());
    assert_eq!(digraph.edge_count(), merged.edge_count());

    let order = petgraph::algo::toposort(&digraph, None).expect("import/call graph is acyclic");
    let position = |id: &str| order.iter().position(|&ix| digraph[ix] == id).unwrap();
    assert!(position("function:app/main.py:main") < position("function:app/greet.py:greet"));
}
