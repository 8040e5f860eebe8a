//! Arena-backed snapshot tree with a flat path index.
//!
//! One tree represents the state of one backend at a point in time. Nodes are
//! owned by the arena and addressed by [`NodeId`]; the parent link is a plain
//! back-reference. A flat `relative_path -> NodeId` index gives O(1) lookup
//! for every node in the tree, root included. Construction is strictly
//! additive; trees are never mutated once a snapshot is built.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// Copyable handle to a node inside one [`SnapshotTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Size and modification time of one filesystem entry or bucket object.
/// Absent only on directory nodes lacking backing data, such as a synthetic
/// intermediate directory inferred from a key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeMetadata {
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// One filesystem entry or object-store key.
///
/// `relative_path` is root-relative with forward slashes; directory paths end
/// with `/` and the root's path is the empty string.
#[derive(Debug)]
pub struct SnapshotNode {
    pub relative_path: String,
    pub is_directory: bool,
    pub metadata: Option<NodeMetadata>,
    pub parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Path-indexed tree of [`SnapshotNode`]s.
#[derive(Debug, Default)]
pub struct SnapshotTree {
    nodes: Vec<SnapshotNode>,
    index: HashMap<String, NodeId>,
    root: Option<NodeId>,
}

impl SnapshotTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node, register it in the path index (last write wins on a
    /// duplicate path), and append it to the parent's children.
    ///
    /// The path is not validated against the parent's path; keeping the tree
    /// consistent with the path hierarchy is the caller's contract.
    pub fn add_node(
        &mut self,
        parent: Option<NodeId>,
        relative_path: impl Into<String>,
        is_directory: bool,
        metadata: Option<NodeMetadata>,
    ) -> NodeId {
        let relative_path = relative_path.into();
        let id = NodeId(self.nodes.len());
        self.nodes.push(SnapshotNode {
            relative_path: relative_path.clone(),
            is_directory,
            metadata,
            parent,
            children: Vec::new(),
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        self.index.insert(relative_path, id);
        id
    }

    /// Create the root node at path `""`. Exactly one per tree.
    pub fn add_root(&mut self, metadata: Option<NodeMetadata>) -> NodeId {
        let id = self.add_node(None, "", true, metadata);
        self.root = Some(id);
        id
    }

    pub fn get(&self, relative_path: &str) -> Option<&SnapshotNode> {
        self.get_id(relative_path).map(|id| self.node(id))
    }

    pub fn get_id(&self, relative_path: &str) -> Option<NodeId> {
        self.index.get(relative_path).copied()
    }

    pub fn node(&self, id: NodeId) -> &SnapshotNode {
        &self.nodes[id.0]
    }

    /// Fill in the metadata of an already-inserted node. Used by the bucket
    /// builder when a directory-marker object arrives after its children have
    /// forced a synthetic node into place.
    pub fn set_metadata(&mut self, id: NodeId, metadata: NodeMetadata) {
        self.nodes[id.0].metadata = Some(metadata);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct children of a node, in insertion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0].children.iter().copied()
    }

    /// Pre-order walk of a node's subtree, excluding the node itself: each
    /// child is yielded immediately followed by that child's full subtree.
    /// Every call starts a fresh traversal.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.nodes[id.0].children.clone();
        stack.reverse();
        Descendants { tree: self, stack }
    }
}

/// Iterator over a subtree in pre-order. See [`SnapshotTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a SnapshotTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let children = &self.tree.nodes[id.0].children;
        self.stack.extend(children.iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(size: u64) -> Option<NodeMetadata> {
        Some(NodeMetadata {
            size,
            modified: None,
        })
    }

    #[test]
    fn get_returns_inserted_node() {
        let mut tree = SnapshotTree::new();
        let root = tree.add_root(meta(0));
        let id = tree.add_node(Some(root), "a.txt", false, meta(10));

        assert_eq!(tree.get_id("a.txt"), Some(id));
        let node = tree.get("a.txt").unwrap();
        assert_eq!(node.relative_path, "a.txt");
        assert_eq!(node.metadata.unwrap().size, 10);
        assert!(tree.get("b.txt").is_none());
    }

    #[test]
    fn root_is_indexed_under_empty_path() {
        let mut tree = SnapshotTree::new();
        let root = tree.add_root(None);

        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.get_id(""), Some(root));
        assert!(tree.node(root).is_directory);
    }

    #[test]
    fn duplicate_path_last_write_wins_in_index() {
        let mut tree = SnapshotTree::new();
        let root = tree.add_root(None);
        tree.add_node(Some(root), "a.txt", false, meta(1));
        let second = tree.add_node(Some(root), "a.txt", false, meta(2));

        assert_eq!(tree.get_id("a.txt"), Some(second));
    }

    #[test]
    fn descendants_walk_is_pre_order() {
        let mut tree = SnapshotTree::new();
        let root = tree.add_root(None);
        let a = tree.add_node(Some(root), "a/", true, None);
        tree.add_node(Some(a), "a/x.txt", false, meta(1));
        tree.add_node(Some(a), "a/y.txt", false, meta(2));
        tree.add_node(Some(root), "b.txt", false, meta(3));

        let order: Vec<&str> = tree
            .descendants(root)
            .map(|id| tree.node(id).relative_path.as_str())
            .collect();
        assert_eq!(order, ["a/", "a/x.txt", "a/y.txt", "b.txt"]);
    }

    #[test]
    fn descendants_exclude_the_start_node() {
        let mut tree = SnapshotTree::new();
        let root = tree.add_root(None);
        let a = tree.add_node(Some(root), "a/", true, None);
        tree.add_node(Some(a), "a/x.txt", false, meta(1));

        let order: Vec<&str> = tree
            .descendants(a)
            .map(|id| tree.node(id).relative_path.as_str())
            .collect();
        assert_eq!(order, ["a/x.txt"]);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut tree = SnapshotTree::new();
        let root = tree.add_root(None);
        tree.add_node(Some(root), "z.txt", false, meta(1));
        tree.add_node(Some(root), "a.txt", false, meta(2));

        let order: Vec<&str> = tree
            .children(root)
            .map(|id| tree.node(id).relative_path.as_str())
            .collect();
        assert_eq!(order, ["z.txt", "a.txt"]);
    }
}
