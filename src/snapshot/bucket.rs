//! Bucket snapshot builder: converts one flat, unpaginated key listing into a
//! snapshot tree via `/`-delimited prefix inference.

use crate::snapshot::{NodeId, NodeMetadata, SnapshotTree};
use crate::store::RemoteObject;

/// Build a snapshot of the bucket side of a run from a full key listing.
///
/// The parent of each key is inferred from its prefix: one trailing `/` is
/// stripped (directory-marker objects), then everything up to and including
/// the last remaining `/` names the parent; no slash means the root. A parent
/// that has not yet appeared in the listing is inserted as a synthetic
/// directory node without metadata, so the result does not depend on listing
/// order. A directory-marker object arriving after its children fills the
/// synthetic node's metadata in place.
pub fn build(objects: &[RemoteObject]) -> SnapshotTree {
    let mut tree = SnapshotTree::new();
    let root_id = tree.add_root(None);

    for object in objects {
        let metadata = NodeMetadata {
            size: object.size,
            modified: object.last_modified,
        };
        if let Some(existing) = tree.get_id(&object.key) {
            tree.set_metadata(existing, metadata);
            continue;
        }

        let parent_path = parent_key(&object.key);
        let parent_id = ensure_directory(&mut tree, root_id, &parent_path);
        tree.add_node(
            Some(parent_id),
            object.key.clone(),
            object.key.ends_with('/'),
            Some(metadata),
        );
    }

    tracing::debug!(nodes = tree.len(), "bucket snapshot built");
    tree
}

/// Inferred parent path of a key, with its trailing `/`, or `""` for keys
/// directly under the root.
fn parent_key(key: &str) -> String {
    let trimmed = key.strip_suffix('/').unwrap_or(key);
    match trimmed.rfind('/') {
        Some(pos) => trimmed[..=pos].to_string(),
        None => String::new(),
    }
}

/// Look up a directory path, inserting it and any missing ancestors as
/// synthetic metadata-less nodes.
fn ensure_directory(tree: &mut SnapshotTree, root_id: NodeId, path: &str) -> NodeId {
    if path.is_empty() {
        return root_id;
    }
    if let Some(id) = tree.get_id(path) {
        return id;
    }
    let parent_id = {
        let parent_path = parent_key(path);
        ensure_directory(tree, root_id, &parent_path)
    };
    tree.add_node(Some(parent_id), path.to_string(), true, None)
}
