//! Asset store for uploaded project images.
//!
//! An [`AssetStore`] is path-addressed blob storage that hands back a
//! publicly retrievable URL for every successful upload.
//!
//! - [`local::LocalAssetStore`] -- files under a directory served over HTTP.
//! - [`s3::S3AssetStore`] -- an S3-compatible bucket.
//! - [`memory::MemoryAssetStore`] -- in-process, for tests.

use async_trait::async_trait;

pub mod config;
pub mod local;
pub mod memory;
pub mod s3;

pub use config::StorageConfig;

/// Errors from asset store backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An object already exists at the path and `upsert` was not set.
    #[error("Asset already exists at '{0}'")]
    AlreadyExists(String),

    /// The path is empty, absolute, or escapes the store root.
    #[error("Invalid asset path '{0}'")]
    InvalidPath(String),

    #[error("Asset I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote object store rejected the request.
    #[error("Object store error: {0}")]
    Remote(String),
}

/// Path-addressed blob storage returning public URLs.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store `bytes` at `path` and return its public URL.
    ///
    /// With `upsert == false` an existing object at `path` is an
    /// [`StorageError::AlreadyExists`] error; with `upsert == true` it is
    /// overwritten.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<String, StorageError>;

    /// Remove the object at `path`. A missing object is not an error.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    /// Public URL an object at `path` is (or would be) served from.
    fn public_url(&self, path: &str) -> String;

    /// The object path behind a URL this store handed out, if it is one.
    fn path_for_url(&self, url: &str) -> Option<String> {
        let base = self.public_url("");
        url.strip_prefix(&base)
            .filter(|path| check_path(path).is_ok())
            .map(str::to_string)
    }
}

/// Reject paths that are empty, absolute, or contain `..` / empty segments.
pub fn check_path(path: &str) -> Result<(), StorageError> {
    let bad = path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");
    if bad {
        Err(StorageError::InvalidPath(path.to_string()))
    } else {
        Ok(())
    }
}

/// Join a base URL and an object path with exactly one slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
