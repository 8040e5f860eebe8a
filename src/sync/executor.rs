//! Plan executor: applies the six action lists through the object store and
//! the local filesystem, in four fixed phases.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::context::SyncContext;
use crate::error::{Result, SyncError};
use crate::store::ObjectStore;
use crate::sync::plan::ActionPlan;

/// Counters for one plan application, printable as the run summary.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct ExecutionStats {
    pub uploaded: usize,
    pub downloaded: usize,
    pub deleted_local: usize,
    pub deleted_bucket: usize,
    pub failed: usize,
}

/// Applies an [`ActionPlan`] for one run.
///
/// Phase order is fixed: bucket additions and updates first, then local
/// additions and updates, then local deletions, then bucket deletions; the
/// deletion phases run only when deletion is enabled. Ordering between the
/// phases matters so an object still needed as a copy source is never deleted
/// first. Local writes and deletes denied by OS permissions are reported per
/// item and the run continues.
pub struct Executor<'a> {
    ctx: &'a SyncContext,
    store: &'a dyn ObjectStore,
}

impl<'a> Executor<'a> {
    pub fn new(ctx: &'a SyncContext, store: &'a dyn ObjectStore) -> Self {
        Self { ctx, store }
    }

    pub async fn apply(&self, plan: &ActionPlan, delete: bool) -> Result<ExecutionStats> {
        let mut stats = ExecutionStats::default();

        for key in plan.bucket_add.iter().chain(&plan.bucket_update) {
            begin_item("Uploading", key);
            self.upload(key).await?;
            println!("done");
            stats.uploaded += 1;
        }

        for key in plan.local_add.iter().chain(&plan.local_update) {
            begin_item("Downloading", key);
            match self.download(key).await {
                Ok(()) => {
                    println!("done");
                    stats.downloaded += 1;
                }
                Err(err @ SyncError::TransferPermission { .. }) => {
                    println!("error: {err}");
                    stats.failed += 1;
                }
                Err(err) => return Err(err),
            }
        }

        if delete {
            for key in &plan.local_delete {
                begin_item("Deleting local", key);
                match self.delete_local(key).await {
                    Ok(()) => {
                        println!("done");
                        stats.deleted_local += 1;
                    }
                    Err(err @ SyncError::TransferPermission { .. }) => {
                        println!("error: {err}");
                        stats.failed += 1;
                    }
                    Err(err) => return Err(err),
                }
            }

            for key in &plan.bucket_delete {
                begin_item("Deleting bucket", key);
                self.store.delete_object(key).await?;
                println!("done");
                stats.deleted_bucket += 1;
            }
        }

        tracing::debug!(?stats, "plan applied");
        Ok(stats)
    }

    async fn upload(&self, key: &str) -> Result<()> {
        if key.ends_with('/') {
            self.store.put_object(key, Vec::new()).await
        } else {
            let full = self.ctx.full_path_of(key);
            let body = tokio::fs::read(&full).await?;
            self.store.put_object(key, body).await
        }
    }

    async fn download(&self, key: &str) -> Result<()> {
        let full = self.ctx.full_path_of(key);
        if key.ends_with('/') {
            if !full.exists() {
                tokio::fs::create_dir_all(&full)
                    .await
                    .map_err(|err| permission_or_io("creating", &full, err))?;
            }
            return Ok(());
        }

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| permission_or_io("creating", parent, err))?;
        }
        let body = self.store.get_object(key).await?;
        tokio::fs::write(&full, body)
            .await
            .map_err(|err| permission_or_io("writing", &full, err))
    }

    async fn delete_local(&self, key: &str) -> Result<()> {
        let full = self.ctx.full_path_of(key);
        // Already gone, nothing to do. A parent directory deleted earlier in
        // the phase can take its children with it.
        if !full.exists() {
            return Ok(());
        }

        let result = if full.is_dir() {
            tokio::fs::remove_dir_all(&full).await
        } else {
            tokio::fs::remove_file(&full).await
        };
        result.map_err(|err| permission_or_io("deleting", &full, err))
    }
}

/// Start one progress line; the outcome (`done` or the error) finishes it.
fn begin_item(verb: &str, key: &str) {
    print!("{verb} '{key}'... ");
    let _ = io::stdout().flush();
}

fn permission_or_io(operation: &'static str, path: &Path, err: io::Error) -> SyncError {
    if err.kind() == io::ErrorKind::PermissionDenied {
        SyncError::TransferPermission {
            operation,
            path: path.display().to_string(),
        }
    } else {
        SyncError::Io(err)
    }
}
