//! Local snapshot builder: walks a filesystem subtree, plus the ancestor
//! chain between the sync root and the object path, into a snapshot tree.

use std::fs;
use std::path::Path;

use chrono::DateTime;
use walkdir::WalkDir;

use crate::context::SyncContext;
use crate::error::Result;
use crate::snapshot::{NodeMetadata, SnapshotTree};

/// Build a snapshot of the local side of a run.
///
/// The root node carries the root path's own metadata. When the object path
/// is nested below the root, the directory chain between them is
/// reconstructed from the root downward, stopping at the first ancestor
/// missing on disk; deeper ancestors below a gap are never inserted. An
/// object path absent on disk leaves the tree without a node at the scope,
/// which is how "object absent locally" is represented.
pub fn build(ctx: &SyncContext) -> Result<SnapshotTree> {
    let mut tree = SnapshotTree::new();
    let root_id = tree.add_root(Some(stat_metadata(ctx.root_path())?));

    if ctx.object_path() != ctx.root_path() {
        let mut parent_id = root_id;
        let scope = ctx.relative_scope()?;

        for ancestor in ancestor_chain(&scope) {
            let full = ctx.root_path().join(&ancestor);
            if !full.exists() {
                break;
            }
            let relative = ctx.relative_path_of(&full)?;
            let metadata = stat_metadata(&full)?;
            parent_id = tree.add_node(Some(parent_id), relative, true, Some(metadata));
        }

        if ctx.object_path().exists() {
            let metadata = stat_metadata(ctx.object_path())?;
            tree.add_node(
                Some(parent_id),
                scope,
                ctx.object_path().is_dir(),
                Some(metadata),
            );
        }
    }

    if ctx.object_path().exists() {
        walk_subtree(&mut tree, ctx)?;
    }

    tracing::debug!(nodes = tree.len(), "local snapshot built");
    Ok(tree)
}

/// Walk the object subtree top-down and insert every directory and file under
/// its already-inserted parent. The walk is sorted by file name so parents
/// always precede children.
fn walk_subtree(tree: &mut SnapshotTree, ctx: &SyncContext) -> Result<()> {
    for entry in WalkDir::new(ctx.object_path()).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        // Depth 0 is the object path itself, inserted before the walk.
        if entry.depth() == 0 {
            continue;
        }

        let parent_relative = match entry.path().parent() {
            Some(parent) => ctx.relative_path_of(parent)?,
            None => continue,
        };
        let Some(parent_id) = tree.get_id(&parent_relative) else {
            break;
        };

        let relative = ctx.relative_path_of(entry.path())?;
        let metadata = stat_metadata(entry.path())?;
        tree.add_node(
            Some(parent_id),
            relative,
            entry.file_type().is_dir(),
            Some(metadata),
        );
    }
    Ok(())
}

fn stat_metadata(path: &Path) -> Result<NodeMetadata> {
    let metadata = fs::metadata(path)?;
    let modified = metadata.modified().ok().and_then(|t| {
        DateTime::from_timestamp(
            t.duration_since(std::time::UNIX_EPOCH).ok()?.as_secs() as i64,
            0,
        )
    });
    Ok(NodeMetadata {
        size: metadata.len(),
        modified,
    })
}

/// Parent directory paths of a root-relative scope, ordered from the root
/// downward, without trailing slashes.
fn ancestor_chain(scope: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = scope.trim_end_matches('/');
    while let Some(pos) = current.rfind('/') {
        current = &current[..pos];
        chain.push(current.to_string());
    }
    chain.reverse();
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ancestor_chain_runs_root_down() {
        assert_eq!(ancestor_chain("a/b/c.txt"), ["a", "a/b"]);
        assert_eq!(ancestor_chain("a/b/c/"), ["a", "a/b"]);
        assert_eq!(ancestor_chain("a.txt"), Vec::<String>::new());
        assert_eq!(ancestor_chain(""), Vec::<String>::new());
    }
}
