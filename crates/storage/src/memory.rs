//! In-process asset store for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{check_path, join_url, AssetStore, StorageError};

/// A stored object: bytes plus content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

pub struct MemoryAssetStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    public_base_url: String,
    offline: AtomicBool,
}

impl MemoryAssetStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            public_base_url: public_base_url.into(),
            offline: AtomicBool::new(false),
        }
    }

    /// Make every subsequent upload and delete fail.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.lock().await.get(path).cloned()
    }

    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<_> = self.objects.lock().await.keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<String, StorageError> {
        check_path(path)?;
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Remote("memory asset store is offline".into()));
        }
        let mut objects = self.objects.lock().await;
        if !upsert && objects.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        objects.insert(
            path.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(self.public_url(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        check_path(path)?;
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Remote("memory asset store is offline".into()));
        }
        self.objects.lock().await.remove(path);
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        join_url(&self.public_base_url, path)
    }
}
