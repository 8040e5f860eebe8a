//! Access key loading from an AWS-style `accessKeys.csv` file: a header line
//! followed by one `access_key_id,secret_access_key` line.

use std::fs;
use std::path::Path;

use crate::error::{Result, SyncError};
use crate::paths;

/// A parsed S3 access key pair.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Credentials {
    /// Load credentials from a CSV file. A relative path is resolved against
    /// the sync root, matching where the tool is normally run from.
    pub fn load(path: &Path, root: &Path) -> Result<Self> {
        let resolved = paths::resolve_path(path, root);
        if !resolved.is_file() {
            return Err(SyncError::CredentialsMissing(resolved));
        }

        let contents = fs::read_to_string(&resolved)?;
        // First line is the CSV header; the key pair is on the second.
        let line = contents
            .lines()
            .nth(1)
            .ok_or_else(|| SyncError::CredentialsMalformed(resolved.clone()))?;

        let mut fields = line.split(',').map(str::trim);
        let access_key_id = fields.next().unwrap_or_default();
        let secret_access_key = fields
            .next()
            .ok_or_else(|| SyncError::CredentialsMalformed(resolved.clone()))?;
        if access_key_id.is_empty() || secret_access_key.is_empty() {
            return Err(SyncError::CredentialsMalformed(resolved));
        }

        Ok(Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
        })
    }
}
