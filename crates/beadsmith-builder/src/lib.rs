//! Graph assembly from extracted records, deterministic merging, and
//! confidence filtering

pub mod builder;
pub mod config;
pub mod filter;
pub mod merge;


#[cfg(test)]
mod test_utils;

pub use builder::{GraphBuilder, RecordBatch};
pub use config::{BuilderConfig, DanglingEdgePolicy};
pub use filter::{filter_by_confidence, retain_min_confidence};
pub use merge::merge_graphs;
