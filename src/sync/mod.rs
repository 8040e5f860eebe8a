//! The tree-diff and reconciliation engine plus the plan executor.

pub mod differ;
pub mod executor;
pub mod plan;
pub mod reconciler;

pub use differ::{diff_trees, DiffEvent};
pub use executor::{ExecutionStats, Executor};
pub use plan::{is_modified, Action, ActionPlan, SyncMode};
pub use reconciler::reconcile;
