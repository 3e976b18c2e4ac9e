//! Builder configuration
//!
//! ```toml
//! dangling_edges = "placeholder"   # or "drop"
//! confidence_threshold = "medium"  # any tier name, case-insensitive
//! ```
//!
//! Every key is optional. Unknown keys and unknown tier names are errors.

use anyhow::{Context, Result};
use beadsmith_core::Confidence;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with an edge whose endpoint is not among the supplied nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingEdgePolicy {
    /// Keep the edge and create an attribute-less node for the missing end.
    #[default]
    Placeholder,
    /// Discard the edge.
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    pub dangling_edges: DanglingEdgePolicy,
    /// Minimum tier kept by `GraphBuilder::apply_threshold`.
    pub confidence_threshold: Confidence,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            dangling_edges: DanglingEdgePolicy::Placeholder,
            confidence_threshold: Confidence::Unsafe,
        }
    }
}

impl BuilderConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid builder config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read builder config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        tracing::debug!("Builder config loaded from: {}", path.display());
        Ok(config)
    }
}
