//! Object-store collaborators: the trait the sync engine talks to and its
//! S3 and in-memory implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

pub mod memory;
pub mod s3;

pub use memory::MemoryStore;
pub use s3::S3Store;

/// One row of a bucket listing.
#[derive(Debug, Clone)]
pub struct RemoteObject {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Narrow interface over a flat key-value bucket.
///
/// Keys are root-relative with forward slashes; a zero-byte key ending in `/`
/// is a directory marker.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Full, unpaginated view of the bucket's keys.
    async fn list_all_objects(&self) -> Result<Vec<RemoteObject>>;

    /// Write an object. An empty body with a trailing-slash key creates a
    /// directory marker.
    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<()>;

    /// Read an object's full body.
    async fn get_object(&self, key: &str) -> Result<Vec<u8>>;

    /// Delete one object by key.
    async fn delete_object(&self, key: &str) -> Result<()>;
}
