use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{Result, SyncError};
use crate::store::{ObjectStore, RemoteObject};

#[derive(Debug, Clone)]
struct StoredObject {
    body: Vec<u8>,
    last_modified: Option<DateTime<Utc>>,
}

/// In-memory, HashMap-based bucket.
///
/// Intended for tests. All objects are held in memory behind a `RwLock` for
/// safe concurrent access; bodies are cloned on read/write. Listings are
/// sorted by key, so directory markers precede their children.
pub struct MemoryStore {
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryStore {
    /// Create a new empty in-memory bucket.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Seed an object without going through the async trait.
    pub fn insert(&self, key: &str, body: Vec<u8>) {
        self.objects.write().expect("lock poisoned").insert(
            key.to_string(),
            StoredObject {
                body,
                last_modified: Some(Utc::now()),
            },
        );
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.read().expect("lock poisoned").contains_key(key)
    }

    /// Body of an object, if present.
    pub fn body_of(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .read()
            .expect("lock poisoned")
            .get(key)
            .map(|object| object.body.clone())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_all_objects(&self) -> Result<Vec<RemoteObject>> {
        let map = self.objects.read().expect("lock poisoned");
        let mut objects: Vec<RemoteObject> = map
            .iter()
            .map(|(key, object)| RemoteObject {
                key: key.clone(),
                size: object.body.len() as u64,
                last_modified: object.last_modified,
            })
            .collect();
        objects.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(objects)
    }

    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<()> {
        self.insert(key, body);
        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        self.objects
            .read()
            .expect("lock poisoned")
            .get(key)
            .map(|object| object.body.clone())
            .ok_or_else(|| SyncError::ObjectMissing(key.to_string()))
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.objects.write().expect("lock poisoned").remove(key);
        Ok(())
    }
}
