//! Node and edge records handed over by the extraction phase

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GraphError;

/// Discriminates what kind of code entity a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    File,
    Module,
    Class,
    Function,
    Method,
    Variable,
}

impl NodeKind {
    /// Serialized tag, as written into graph attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Module => "module",
            NodeKind::Class => "class",
            NodeKind::Function => "function",
            NodeKind::Method => "method",
            NodeKind::Variable => "variable",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of relationship an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Call,
    Import,
    Inherits,
    Implements,
    Reference,
}

impl EdgeKind {
    /// Serialized tag, as written into graph attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Call => "call",
            EdgeKind::Import => "import",
            EdgeKind::Inherits => "inherits",
            EdgeKind::Implements => "implements",
            EdgeKind::Reference => "reference",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How reliable an extracted relationship is.
///
/// Variants are declared lowest first, so the derived ordering is
/// `Unsafe < Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Confidence {
    Unsafe,
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Every tier, lowest first.
    pub const ALL: [Confidence; 4] = [
        Confidence::Unsafe,
        Confidence::Low,
        Confidence::Medium,
        Confidence::High,
    ];

    /// Tier name, as written into graph attributes and accepted as a threshold.
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Unsafe => "unsafe",
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Confidence {
    type Err = GraphError;

    /// Parse a tier name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Confidence::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                GraphError::InvalidArgument(format!(
                    "unknown confidence tier '{}' (expected one of: high, medium, low, unsafe)",
                    s
                ))
            })
    }
}

impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// A single code entity discovered by extraction.
///
/// Identity is `id` alone; two records with the same id are the same logical
/// node whatever their other fields say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeKind,
    pub file_path: PathBuf,
    /// 0 means file-level.
    pub line_number: u32,
    pub name: String,
    #[serde(default)]
    pub docstring: Option<String>,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub return_type: Option<String>,
}

impl GraphNode {
    /// Create a node with no docstring, parameters, or return type.
    pub fn new(
        id: impl Into<String>,
        node_type: NodeKind,
        file_path: impl Into<PathBuf>,
        line_number: u32,
        name: impl Into<String>,
    ) -> Self {
        GraphNode {
            id: id.into(),
            node_type,
            file_path: file_path.into(),
            line_number,
            name: name.into(),
            docstring: None,
            parameters: Vec::new(),
            return_type: None,
        }
    }

    /// Set the docstring.
    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }

    /// Set the parameter names, in declaration order.
    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    /// Set the return-type annotation.
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    /// Compose the conventional id for an entity: `file:<path>` for files,
    /// `<kind>:<path>:<name>` for everything else.
    pub fn compose_id(kind: NodeKind, file_path: &Path, name: &str) -> String {
        match kind {
            NodeKind::File => format!("{}:{}", kind, file_path.display()),
            _ => format!("{}:{}:{}", kind, file_path.display(), name),
        }
    }

    /// Everything but the id, as written into a graph.
    pub fn attributes(&self) -> NodeAttributes {
        NodeAttributes {
            node_type: self.node_type,
            file_path: self.file_path.clone(),
            line_number: self.line_number,
            name: self.name.clone(),
            docstring: self.docstring.clone(),
            parameters: self.parameters.clone(),
            return_type: self.return_type.clone(),
        }
    }
}

/// A directed relationship discovered by extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from_node: String,
    pub to_node: String,
    pub edge_type: EdgeKind,
    pub confidence: Confidence,
    /// Where in source the reference appears.
    pub line_number: u32,
    pub label: String,
}

impl GraphEdge {
    /// Create an edge at line 0 with an empty label.
    pub fn new(
        from_node: impl Into<String>,
        to_node: impl Into<String>,
        edge_type: EdgeKind,
        confidence: Confidence,
    ) -> Self {
        GraphEdge {
            from_node: from_node.into(),
            to_node: to_node.into(),
            edge_type,
            confidence,
            line_number: 0,
            label: String::new(),
        }
    }

    /// Set the line of the reference.
    pub fn at_line(mut self, line_number: u32) -> Self {
        self.line_number = line_number;
        self
    }

    /// Set the human-readable label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Everything but the endpoint pair, as written into a graph.
    pub fn attributes(&self) -> EdgeAttributes {
        EdgeAttributes {
            edge_type: self.edge_type,
            confidence: self.confidence,
            line_number: self.line_number,
            label: self.label.clone(),
        }
    }
}

/// The attribute set stored for a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAttributes {
    #[serde(rename = "type")]
    pub node_type: NodeKind,
    pub file_path: PathBuf,
    pub line_number: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

/// The attribute set stored for an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeAttributes {
    pub edge_type: EdgeKind,
    pub confidence: Confidence,
    pub line_number: u32,
    pub label: String,
}
