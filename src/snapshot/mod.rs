//! Point-in-time hierarchical snapshots of the two storage backends.

pub mod bucket;
pub mod local;
pub mod tree;

pub use tree::{NodeId, NodeMetadata, SnapshotNode, SnapshotTree};
