// Path normalization utilities for cross-platform path handling
// Handles both forward and backward slashes in relative paths

use std::io;
use std::path::{Component, Path, PathBuf};

/// Normalize separators in a relative path string to forward slashes.
pub fn normalize_separators(path_str: &str) -> String {
    path_str.replace('\\', "/")
}

/// Resolve a path that may be relative or absolute.
/// If relative, resolves against the provided base directory.
pub fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Make a path absolute lexically: join against the current directory when
/// relative, then clean redundant components. Symlinks are not resolved.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(clean_path(path))
    } else {
        Ok(clean_path(&std::env::current_dir()?.join(path)))
    }
}

/// Clean a path by removing redundant components like "." and ".."
/// This provides a normalized form without requiring the path to exist
pub fn clean_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {
                continue;
            }
            Component::ParentDir => {
                // Handle ".." by popping the last component if possible
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                    continue;
                }
                components.push(component);
            }
            _ => {
                components.push(component);
            }
        }
    }

    let mut result = PathBuf::new();
    for component in components {
        result.push(component);
    }

    if result.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        result
    }
}
