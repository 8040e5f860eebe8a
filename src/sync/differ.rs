//! Scope-rooted walk of one snapshot against another.
//!
//! The differ is direction-agnostic: it walks the source tree under a scope
//! path and reports, for each node, whether the same path exists in the
//! target tree. Both reconciliation passes reuse it with source and target
//! swapped. It returns a flat event list rather than invoking handlers, so
//! classification stays a pure function on the caller's side.

use crate::snapshot::{SnapshotNode, SnapshotTree};

/// One comparison outcome for a source-tree node.
#[derive(Debug)]
pub enum DiffEvent<'a> {
    /// The source node's path exists in the target tree.
    Matched {
        source: &'a SnapshotNode,
        target: &'a SnapshotNode,
    },
    /// The source node's path has no counterpart in the target tree.
    Absent { source: &'a SnapshotNode },
}

impl DiffEvent<'_> {
    pub fn path(&self) -> &str {
        match self {
            DiffEvent::Matched { source, .. } | DiffEvent::Absent { source } => {
                &source.relative_path
            }
        }
    }
}

/// Compare the source subtree under `scope_path` against the target tree.
///
/// A scope path absent from the source yields no events. The scope node
/// itself is reported first unless it is the root (empty path), followed by
/// its full subtree in pre-order.
pub fn diff_trees<'a>(
    scope_path: &str,
    source: &'a SnapshotTree,
    target: &'a SnapshotTree,
) -> Vec<DiffEvent<'a>> {
    let mut events = Vec::new();
    let Some(scope_id) = source.get_id(scope_path) else {
        return events;
    };

    let scope = source.node(scope_id);
    if !scope.relative_path.is_empty() {
        events.push(compare(scope, target));
    }
    for id in source.descendants(scope_id) {
        events.push(compare(source.node(id), target));
    }
    events
}

fn compare<'a>(source: &'a SnapshotNode, target: &'a SnapshotTree) -> DiffEvent<'a> {
    match target.get(&source.relative_path) {
        Some(target) => DiffEvent::Matched { source, target },
        None => DiffEvent::Absent { source },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{NodeMetadata, SnapshotTree};

    fn tree_with(paths: &[(&str, bool, u64)]) -> SnapshotTree {
        let mut tree = SnapshotTree::new();
        let root = tree.add_root(None);
        for (path, is_dir, size) in paths {
            let parent = match path.trim_end_matches('/').rfind('/') {
                Some(pos) => tree.get_id(&path[..=pos]).unwrap(),
                None => root,
            };
            tree.add_node(
                Some(parent),
                *path,
                *is_dir,
                Some(NodeMetadata {
                    size: *size,
                    modified: None,
                }),
            );
        }
        tree
    }

    #[test]
    fn missing_scope_yields_no_events() {
        let source = tree_with(&[("a.txt", false, 1)]);
        let target = tree_with(&[]);

        assert!(diff_trees("ghost.txt", &source, &target).is_empty());
    }

    #[test]
    fn root_scope_walks_everything_but_skips_the_root() {
        let source = tree_with(&[("a/", true, 0), ("a/x.txt", false, 2), ("b.txt", false, 3)]);
        let target = tree_with(&[("a/", true, 0)]);

        let events = diff_trees("", &source, &target);
        let paths: Vec<&str> = events.iter().map(|e| e.path()).collect();
        assert_eq!(paths, ["a/", "a/x.txt", "b.txt"]);
        assert!(matches!(events[0], DiffEvent::Matched { .. }));
        assert!(matches!(events[1], DiffEvent::Absent { .. }));
        assert!(matches!(events[2], DiffEvent::Absent { .. }));
    }

    #[test]
    fn nested_scope_reports_the_scope_node_first() {
        let source = tree_with(&[("a/", true, 0), ("a/x.txt", false, 2)]);
        let target = tree_with(&[("a/", true, 0), ("a/x.txt", false, 2)]);

        let events = diff_trees("a/", &source, &target);
        let paths: Vec<&str> = events.iter().map(|e| e.path()).collect();
        assert_eq!(paths, ["a/", "a/x.txt"]);
        assert!(events.iter().all(|e| matches!(e, DiffEvent::Matched { .. })));
    }
}
