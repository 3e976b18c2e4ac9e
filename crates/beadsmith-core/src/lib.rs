//! Beadsmith Core — code entity records, the owned directed graph, and errors

pub mod error;
pub mod graph;
pub mod model;


pub use error::{GraphError, Result};
pub use graph::{EdgeEntry, Graph, GraphDocument, NodeEntry};
pub use model::{Confidence, EdgeAttributes, EdgeKind, GraphEdge, GraphNode, NodeAttributes, NodeKind};
