use opendal::{services::S3, Operator};

use async_trait::async_trait;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::store::{ObjectStore, RemoteObject};

/// S3 and S3-compatible bucket access using OpenDAL.
pub struct S3Store {
    operator: Operator,
    bucket: String,
}

impl S3Store {
    /// Create a store for one bucket with explicit credentials.
    ///
    /// An endpoint override points the operator at an S3-compatible service
    /// (MinIO, Spaces, R2); without one the default AWS endpoint for the
    /// region is used.
    pub fn new(
        bucket: &str,
        region: &str,
        credentials: &Credentials,
        endpoint: Option<&str>,
    ) -> Result<Self> {
        let mut builder = S3::default()
            .bucket(bucket)
            .region(region)
            .access_key_id(&credentials.access_key_id)
            .secret_access_key(&credentials.secret_access_key);

        if let Some(endpoint) = endpoint {
            builder = builder.endpoint(endpoint);
        }

        let operator = Operator::new(builder)?.finish();

        Ok(Self {
            operator,
            bucket: bucket.to_string(),
        })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_all_objects(&self) -> Result<Vec<RemoteObject>> {
        let entries = self.operator.list_with("").recursive(true).await?;

        let mut objects = Vec::new();
        for entry in entries {
            let key = entry.path().trim_start_matches('/').to_string();
            // Skip the bucket root pseudo-entry
            if key.is_empty() {
                continue;
            }
            let metadata = entry.metadata();
            objects.push(RemoteObject {
                key,
                size: metadata.content_length(),
                last_modified: metadata.last_modified(),
            });
        }

        tracing::debug!(bucket = %self.bucket, objects = objects.len(), "listed bucket");
        Ok(objects)
    }

    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<()> {
        if key.ends_with('/') {
            // S3 has no real directories; a marker is a zero-byte object
            // with a trailing slash, which OpenDAL writes via create_dir.
            self.operator.create_dir(key).await?;
        } else {
            self.operator.write(key, body).await?;
        }
        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let content = self.operator.read(key).await?;
        Ok(content.to_vec())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.operator.delete(key).await?;
        Ok(())
    }
}
