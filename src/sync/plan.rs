//! Sync modes, the six-bucket action plan, and the routing decision table.

use serde::Serialize;

use crate::snapshot::SnapshotNode;

/// Synchronization mode. The CLI's numeric `--type` maps 0, 1, 2 onto the
/// variants in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Changes flow both ways; nothing is deleted.
    Bidirectional,
    /// Local storage is replicated from itself outward: the bucket receives
    /// local changes and local-only files trigger local deletions.
    LocalReplica,
    /// The bucket is authoritative: local receives bucket changes and
    /// bucket-only keys trigger bucket deletions.
    BucketReplica,
}

impl SyncMode {
    pub fn from_type_flag(value: u8) -> Option<Self> {
        match value {
            0 => Some(SyncMode::Bidirectional),
            1 => Some(SyncMode::LocalReplica),
            2 => Some(SyncMode::BucketReplica),
            _ => None,
        }
    }
}

/// One planned transfer or deletion, keyed by direction and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LocalAdd,
    LocalUpdate,
    LocalDelete,
    BucketAdd,
    BucketUpdate,
    BucketDelete,
}

/// Comparison outcome of one source-tree node against the target tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeOutcome {
    /// Present in both trees with no size change.
    Unchanged,
    /// Present in both trees but modified per [`is_modified`].
    Modified,
    /// No counterpart at the same path in the target tree.
    Absent,
}

/// The deterministic action list of one run: six ordered path sequences.
/// Built once by the reconciler, consumed once by the executor.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ActionPlan {
    pub local_add: Vec<String>,
    pub local_update: Vec<String>,
    pub local_delete: Vec<String>,
    pub bucket_add: Vec<String>,
    pub bucket_update: Vec<String>,
    pub bucket_delete: Vec<String>,
}

impl ActionPlan {
    pub fn push(&mut self, action: Action, path: String) {
        match action {
            Action::LocalAdd => self.local_add.push(path),
            Action::LocalUpdate => self.local_update.push(path),
            Action::LocalDelete => self.local_delete.push(path),
            Action::BucketAdd => self.bucket_add.push(path),
            Action::BucketUpdate => self.bucket_update.push(path),
            Action::BucketDelete => self.bucket_delete.push(path),
        }
    }

    pub fn len(&self) -> usize {
        self.local_add.len()
            + self.local_update.len()
            + self.local_delete.len()
            + self.bucket_add.len()
            + self.bucket_update.len()
            + self.bucket_delete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Change detection between two matched nodes: true when either side lacks
/// metadata or the sizes differ. Timestamps are carried in the snapshots but
/// deliberately not compared.
pub fn is_modified(target: &SnapshotNode, source: &SnapshotNode) -> bool {
    match (&target.metadata, &source.metadata) {
        (Some(target), Some(source)) => target.size != source.size,
        _ => true,
    }
}

/// Routing for the bucket-as-source pass: what happens to a bucket-side node
/// given its outcome against the local tree.
pub fn route_from_bucket(mode: SyncMode, outcome: NodeOutcome) -> Option<Action> {
    match (mode, outcome) {
        (_, NodeOutcome::Unchanged) => None,
        (SyncMode::Bidirectional, NodeOutcome::Modified) => Some(Action::LocalUpdate),
        (SyncMode::Bidirectional, NodeOutcome::Absent) => Some(Action::LocalAdd),
        // Local is the source of truth; bucket state never flows inward.
        (SyncMode::LocalReplica, NodeOutcome::Modified) => None,
        (SyncMode::LocalReplica, NodeOutcome::Absent) => None,
        (SyncMode::BucketReplica, NodeOutcome::Modified) => Some(Action::LocalUpdate),
        (SyncMode::BucketReplica, NodeOutcome::Absent) => Some(Action::BucketDelete),
    }
}

/// Routing for the local-as-source pass: what happens to a local-side node
/// given its outcome against the bucket tree.
pub fn route_from_local(mode: SyncMode, outcome: NodeOutcome) -> Option<Action> {
    match (mode, outcome) {
        (_, NodeOutcome::Unchanged) => None,
        (SyncMode::Bidirectional, NodeOutcome::Modified) => Some(Action::BucketUpdate),
        (SyncMode::Bidirectional, NodeOutcome::Absent) => Some(Action::BucketAdd),
        (SyncMode::LocalReplica, NodeOutcome::Modified) => Some(Action::BucketUpdate),
        (SyncMode::LocalReplica, NodeOutcome::Absent) => Some(Action::LocalDelete),
        // The bucket is the source of truth; local state never flows outward.
        (SyncMode::BucketReplica, NodeOutcome::Modified) => None,
        (SyncMode::BucketReplica, NodeOutcome::Absent) => None,
    }
}
