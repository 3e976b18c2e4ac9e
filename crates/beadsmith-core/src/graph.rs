//! Owned directed graph keyed by node id and by (source, target) pair

use crate::model::{EdgeAttributes, NodeAttributes, NodeKind};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A node as stored in the graph. `attributes` is `None` for a placeholder
/// created implicitly by an edge endpoint.
///
/// When read back, an entry is a placeholder only if `id` is its sole key;
/// any other entry must carry a complete, valid attribute set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NodeEntryFields")]
pub struct NodeEntry {
    pub id: String,
    #[serde(flatten)]
    pub attributes: Option<NodeAttributes>,
}

impl NodeEntry {
    /// Whether this node was created by an edge endpoint alone.
    pub fn is_placeholder(&self) -> bool {
        self.attributes.is_none()
    }
}

/// Serialized node entry with every attribute optional, so a placeholder
/// can be told apart from a malformed attribute set.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeEntryFields {
    id: String,
    #[serde(rename = "type")]
    node_type: Option<NodeKind>,
    file_path: Option<PathBuf>,
    line_number: Option<u32>,
    name: Option<String>,
    docstring: Option<String>,
    parameters: Option<Vec<String>>,
    return_type: Option<String>,
}

impl TryFrom<NodeEntryFields> for NodeEntry {
    type Error = String;

    fn try_from(fields: NodeEntryFields) -> Result<Self, Self::Error> {
        let NodeEntryFields {
            id,
            node_type,
            file_path,
            line_number,
            name,
            docstring,
            parameters,
            return_type,
        } = fields;

        if node_type.is_none()
            && file_path.is_none()
            && line_number.is_none()
            && name.is_none()
            && docstring.is_none()
            && parameters.is_none()
            && return_type.is_none()
        {
            return Ok(NodeEntry { id, attributes: None });
        }

        let missing = |field: &str| format!("node {}: missing field `{}`", id, field);
        let attributes = NodeAttributes {
            node_type: node_type.ok_or_else(|| missing("type"))?,
            file_path: file_path.ok_or_else(|| missing("file_path"))?,
            line_number: line_number.ok_or_else(|| missing("line_number"))?,
            name: name.ok_or_else(|| missing("name"))?,
            docstring,
            parameters: parameters.unwrap_or_default(),
            return_type,
        };
        Ok(NodeEntry {
            id,
            attributes: Some(attributes),
        })
    }
}

/// An edge as stored in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub attributes: EdgeAttributes,
}

/// Serialized shape of a [`Graph`]: both lists in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<NodeEntry>,
    #[serde(default)]
    pub edges: Vec<EdgeEntry>,
}

/// The code graph: at most one attribute set per node id and per ordered
/// (source, target) pair.
///
/// Nodes and edges are kept in insertion order; the hash indices are only
/// used for lookup, so iteration never depends on hashing. Every insert is
/// first-wins: an existing attribute set is never replaced or partially
/// updated. The one exception is a placeholder, which has no attribute set
/// and is filled in by the first real one written for its id.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "GraphDocument", from = "GraphDocument")]
pub struct Graph {
    nodes: Vec<NodeEntry>,
    node_index: HashMap<String, usize>,
    edges: Vec<EdgeEntry>,
    /// source -> target -> position in `edges`
    edge_index: HashMap<String, HashMap<String, usize>>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.node_count())
            .field("edge_count", &self.edge_count())
            .field("placeholder_count", &self.placeholder_count())
            .finish()
    }
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            node_index: HashMap::new(),
            edges: Vec::new(),
            edge_index: HashMap::new(),
        }
    }

    /// Write a node's attribute set unless the id already carries one.
    /// Returns whether anything was written.
    pub fn insert_node(&mut self, id: impl Into<String>, attributes: NodeAttributes) -> bool {
        let id = id.into();
        if let Some(&idx) = self.node_index.get(&id) {
            let entry = &mut self.nodes[idx];
            if entry.attributes.is_some() {
                tracing::trace!("Duplicate node id {}, keeping first occurrence", id);
                return false;
            }
            entry.attributes = Some(attributes);
            return true;
        }
        self.push_node(id, Some(attributes));
        true
    }

    /// Add an attribute-less node if the id is not present yet.
    pub fn insert_placeholder(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return false;
        }
        tracing::trace!("Creating placeholder node {}", id);
        self.push_node(id, None);
        true
    }

    /// Write an edge unless the ordered pair already has one. Missing
    /// endpoints become placeholder nodes.
    pub fn insert_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        attributes: EdgeAttributes,
    ) -> bool {
        let source = source.into();
        let target = target.into();
        if self.has_edge(&source, &target) {
            tracing::trace!("Duplicate edge {} -> {}, keeping first occurrence", source, target);
            return false;
        }

        self.insert_placeholder(source.as_str());
        self.insert_placeholder(target.as_str());

        let idx = self.edges.len();
        self.edge_index
            .entry(source.clone())
            .or_default()
            .insert(target.clone(), idx);
        self.edges.push(EdgeEntry {
            source,
            target,
            attributes,
        });
        true
    }

    /// Insert a stored node entry, placeholder or not, with the same rules as
    /// `insert_node` / `insert_placeholder`.
    pub fn insert_node_entry(&mut self, entry: NodeEntry) -> bool {
        match entry.attributes {
            Some(attributes) => self.insert_node(entry.id, attributes),
            None => self.insert_placeholder(entry.id),
        }
    }

    fn push_node(&mut self, id: String, attributes: Option<NodeAttributes>) {
        self.node_index.insert(id.clone(), self.nodes.len());
        self.nodes.push(NodeEntry { id, attributes });
    }

    /// Total number of nodes, placeholders included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of nodes without an attribute set.
    pub fn placeholder_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_placeholder()).count()
    }

    /// Check if the graph has no nodes and no edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Check if a node id is present, placeholder or not.
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Attributes of a node; `None` if it is absent or a placeholder.
    pub fn node(&self, id: &str) -> Option<&NodeAttributes> {
        self.node_index
            .get(id)
            .and_then(|&idx| self.nodes[idx].attributes.as_ref())
    }

    /// Check if a node id is present without an attribute set.
    pub fn is_placeholder(&self, id: &str) -> bool {
        self.node_index
            .get(id)
            .is_some_and(|&idx| self.nodes[idx].is_placeholder())
    }

    /// Check if an edge exists for the ordered pair.
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edge(source, target).is_some()
    }

    /// Get the attributes of the edge for the ordered pair.
    pub fn edge(&self, source: &str, target: &str) -> Option<&EdgeAttributes> {
        self.edge_index
            .get(source)
            .and_then(|targets| targets.get(target))
            .map(|&idx| &self.edges[idx].attributes)
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeEntry> {
        self.nodes.iter()
    }

    /// Iterate over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeEntry> {
        self.edges.iter()
    }

    /// Targets of outgoing edges from a node, in edge insertion order.
    pub fn successors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source == id)
            .map(|e| e.target.as_str())
    }

    /// Sources of incoming edges to a node, in edge insertion order.
    pub fn predecessors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.target == id)
            .map(|e| e.source.as_str())
    }

    /// Copy into a petgraph `DiGraph` for downstream analysis. Node weights
    /// are ids; `NodeIndex::new(i)` is the i-th node of this graph.
    pub fn to_petgraph(&self) -> DiGraph<String, EdgeAttributes> {
        let mut out = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        for entry in &self.nodes {
            out.add_node(entry.id.clone());
        }
        for edge in &self.edges {
            let (Some(&source), Some(&target)) = (
                self.node_index.get(&edge.source),
                self.node_index.get(&edge.target),
            ) else {
                continue;
            };
            out.add_edge(
                NodeIndex::new(source),
                NodeIndex::new(target),
                edge.attributes.clone(),
            );
        }
        out
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Graph> for GraphDocument {
    fn from(graph: Graph) -> Self {
        GraphDocument {
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }
}

impl From<GraphDocument> for Graph {
    /// Replays the entries through the first-wins inserts, so duplicate
    /// entries in a hand-written document resolve the same way as in a build.
    fn from(document: GraphDocument) -> Self {
        let mut graph = Graph::new();
        for entry in document.nodes {
            graph.insert_node_entry(entry);
        }
        for edge in document.edges {
            graph.insert_edge(edge.source, edge.target, edge.attributes);
        }
        graph
    }
}
