//! Per-run synchronization context: the resolved root and object paths and
//! the relative-path conversions between them.

use std::path::{Path, PathBuf};

use crate::error::{Result, SyncError};
use crate::paths;

/// Resolved environment for one synchronization run.
///
/// The root path is the local directory the bucket's top-level namespace maps
/// to; the object path is the file or directory the user asked to
/// synchronize, always equal to or nested inside the root.
#[derive(Debug, Clone)]
pub struct SyncContext {
    root_path: PathBuf,
    object_path: PathBuf,
}

impl SyncContext {
    /// Resolve the object and root paths for a run.
    ///
    /// With no explicit root, the object path must exist and the root becomes
    /// the object itself (directory) or its parent (file). With an explicit
    /// root, the root must exist, a relative object path is joined onto it,
    /// and the object must fall inside the root. Resolution is lexical: paths
    /// are absolutized and cleaned, symlinks are not followed.
    pub fn resolve(object_path: &Path, root_path: Option<&Path>) -> Result<Self> {
        match root_path {
            None => {
                let object = paths::absolutize(object_path)?;
                if !object.exists() {
                    return Err(SyncError::PathMissing(object));
                }
                let root = if object.is_dir() {
                    object.clone()
                } else {
                    object
                        .parent()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| object.clone())
                };
                Ok(Self {
                    root_path: root,
                    object_path: object,
                })
            }
            Some(root) => {
                let root = paths::absolutize(root)?;
                if !root.exists() {
                    return Err(SyncError::PathMissing(root));
                }
                let object = if object_path.is_absolute() {
                    paths::clean_path(object_path)
                } else {
                    paths::clean_path(&root.join(object_path))
                };
                if !object.starts_with(&root) {
                    return Err(SyncError::ObjectOutsideRoot {
                        object,
                        root,
                    });
                }
                Ok(Self {
                    root_path: root,
                    object_path: object,
                })
            }
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn object_path(&self) -> &Path {
        &self.object_path
    }

    /// The object path in root-relative form; the empty string when the
    /// object path is the root itself.
    pub fn relative_scope(&self) -> Result<String> {
        self.relative_path_of(&self.object_path)
    }

    /// Convert a full path inside the root into its root-relative form:
    /// forward slashes, and a trailing `/` when the path is a directory on
    /// disk. Paths outside the root are an error.
    pub fn relative_path_of(&self, full_path: &Path) -> Result<String> {
        let stripped = full_path
            .strip_prefix(&self.root_path)
            .map_err(|_| SyncError::OutsideRoot(full_path.to_path_buf()))?;
        let mut relative = paths::normalize_separators(&stripped.to_string_lossy());
        if !relative.is_empty() && full_path.is_dir() {
            relative.push('/');
        }
        Ok(relative)
    }

    /// Map a root-relative path back onto the local filesystem.
    pub fn full_path_of(&self, relative_path: &str) -> PathBuf {
        self.root_path.join(relative_path.trim_end_matches('/'))
    }
}
