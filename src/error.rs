//! Error types for synchronization runs.

use std::path::PathBuf;

/// Errors that can occur while resolving a run's environment, building
/// snapshots, or applying an action plan.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A path given on the command line does not exist.
    #[error("path error: '{0}' does not exist")]
    PathMissing(PathBuf),

    /// The object path is not equal to or nested inside the root path.
    #[error("path error: object path '{object}' is not inside root path '{root}'")]
    ObjectOutsideRoot { object: PathBuf, root: PathBuf },

    /// A full path handed to relative-path conversion lies outside the root.
    #[error("invalid relative path conversion argument: '{0}'")]
    OutsideRoot(PathBuf),

    /// The credentials file path does not resolve to an existing file.
    #[error("credentials path '{0}' is not valid")]
    CredentialsMissing(PathBuf),

    /// The credentials file exists but does not hold a usable key pair.
    #[error("credentials file '{0}' is malformed")]
    CredentialsMalformed(PathBuf),

    /// A requested key was not present in the bucket.
    #[error("object '{0}' not found in bucket")]
    ObjectMissing(String),

    /// A local write or delete was denied by OS permissions. Recovered per
    /// item by the executor; the run continues with the remaining items.
    #[error("permission denied while {operation} '{path}'")]
    TransferPermission {
        operation: &'static str,
        path: String,
    },

    /// Object store operation failed.
    #[error("object store error: {0}")]
    Store(#[from] opendal::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias for synchronization results.
pub type Result<T> = std::result::Result<T, SyncError>;
