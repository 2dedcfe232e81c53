//! Local-disk blob store

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::blob_store::{BlobStore, PutOptions, StorageError};
use crate::config::StorageConfig;

/// Blob store writing beneath a configured root directory.
/// Objects are served under `public_base_url` by whatever fronts the
/// directory (a static file server in deployment, nothing in tests).
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
    public_base: String,
}

impl DiskStore {
    /// Create a store from configuration
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root_dir),
            public_base: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a store with an explicit root and public base
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>, public_base: &str) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve an object path beneath the root, rejecting traversal
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let safe = relative.components().all(|c| matches!(c, Component::Normal(_)));
        if path.is_empty() || !safe {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for DiskStore {
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        options: PutOptions<'_>,
    ) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        if !options.overwrite && tokio::fs::try_exists(&target).await? {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        debug!(path, size = bytes.len(), content_type = options.content_type, "stored blob");
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base, path)
    }
}
