//! Filesystem-backed asset store.
//!
//! Objects are written under `root`; the API serves `root` at the configured
//! public base URL so every stored path maps one-to-one onto a URL.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::{check_path, join_url, AssetStore, StorageError};

pub struct LocalAssetStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalAssetStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
        upsert: bool,
    ) -> Result<String, StorageError> {
        check_path(path)?;
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        if upsert {
            tokio::fs::write(&full_path, &bytes).await?;
        } else {
            let mut file = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&full_path)
                .await
                .map_err(|e| match e.kind() {
                    std::io::ErrorKind::AlreadyExists => {
                        StorageError::AlreadyExists(path.to_string())
                    }
                    _ => StorageError::Io(e),
                })?;
            file.write_all(&bytes).await?;
            file.flush().await?;
        }

        tracing::debug!(path, size = bytes.len(), "Stored asset on local disk");
        Ok(self.public_url(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        check_path(path)?;
        match tokio::fs::remove_file(self.root.join(path)).await {
            Ok(()) => {
                tracing::debug!(path, "Removed asset from local disk");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn public_url(&self, path: &str) -> String {
        join_url(&self.public_base_url, path)
    }
}
