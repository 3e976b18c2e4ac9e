//! Error types for graph operations

use thiserror::Error;

/// Result alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A caller-supplied argument could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
