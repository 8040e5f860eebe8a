//! Reconciler: two differ passes over the same scope, routed through the
//! mode decision table into one action plan.

use crate::snapshot::SnapshotTree;
use crate::sync::differ::{diff_trees, DiffEvent};
use crate::sync::plan::{
    is_modified, route_from_bucket, route_from_local, ActionPlan, NodeOutcome, SyncMode,
};

/// Build the action plan for one run.
///
/// Pass 1 walks the bucket tree against the local tree and decides what the
/// local side receives or what the bucket loses; pass 2 swaps the trees and
/// decides the opposite direction. Each pass classifies every event and
/// routes it through the mode table; matched-but-unchanged nodes route
/// nowhere in every mode.
pub fn reconcile(
    scope_path: &str,
    local: &SnapshotTree,
    bucket: &SnapshotTree,
    mode: SyncMode,
) -> ActionPlan {
    let mut plan = ActionPlan::default();

    for event in diff_trees(scope_path, bucket, local) {
        let outcome = classify(&event);
        if let Some(action) = route_from_bucket(mode, outcome) {
            plan.push(action, event.path().to_string());
        }
    }

    for event in diff_trees(scope_path, local, bucket) {
        let outcome = classify(&event);
        if let Some(action) = route_from_local(mode, outcome) {
            plan.push(action, event.path().to_string());
        }
    }

    tracing::debug!(actions = plan.len(), ?mode, "action plan assembled");
    plan
}

fn classify(event: &DiffEvent<'_>) -> NodeOutcome {
    match event {
        DiffEvent::Matched { source, target } => {
            if is_modified(target, source) {
                NodeOutcome::Modified
            } else {
                NodeOutcome::Unchanged
            }
        }
        DiffEvent::Absent { .. } => NodeOutcome::Absent,
    }
}
