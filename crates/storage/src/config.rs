//! Asset backend selection from the environment.

use std::sync::Arc;

use crate::local::LocalAssetStore;
use crate::s3::{S3AssetStore, S3Settings};
use crate::AssetStore;

/// Default directory for locally stored assets.
const DEFAULT_ASSET_ROOT: &str = "storage/assets";

/// Default public URL prefix the API serves local assets under.
const DEFAULT_ASSET_PUBLIC_URL: &str = "http://localhost:3000/assets";

/// Which asset backend to use and how to reach it.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Local {
        root: String,
        public_base_url: String,
    },
    S3(S3Settings),
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `ASSET_BACKEND`        | `local` (or `s3`)                |
    /// | `ASSET_ROOT`           | `storage/assets`                 |
    /// | `ASSET_PUBLIC_URL`     | `http://localhost:3000/assets`   |
    /// | `S3_BUCKET`            | required for `s3`                |
    /// | `S3_REGION`            | `us-east-1`                      |
    /// | `S3_ENDPOINT`          | --                               |
    /// | `S3_PUBLIC_URL`        | required for `s3`                |
    /// | `S3_ACCESS_KEY_ID`     | --                               |
    /// | `S3_SECRET_ACCESS_KEY` | --                               |
    ///
    /// # Panics
    ///
    /// Panics on an unknown backend or a missing required `s3` variable.
    pub fn from_env() -> Self {
        let backend = std::env::var("ASSET_BACKEND").unwrap_or_else(|_| "local".into());
        match backend.as_str() {
            "local" => Self::Local {
                root: std::env::var("ASSET_ROOT").unwrap_or_else(|_| DEFAULT_ASSET_ROOT.into()),
                public_base_url: std::env::var("ASSET_PUBLIC_URL")
                    .unwrap_or_else(|_| DEFAULT_ASSET_PUBLIC_URL.into()),
            },
            "s3" => Self::S3(S3Settings {
                bucket: std::env::var("S3_BUCKET").expect("S3_BUCKET must be set for ASSET_BACKEND=s3"),
                region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".into()),
                endpoint: std::env::var("S3_ENDPOINT").ok(),
                public_base_url: std::env::var("S3_PUBLIC_URL")
                    .expect("S3_PUBLIC_URL must be set for ASSET_BACKEND=s3"),
                access_key_id: std::env::var("S3_ACCESS_KEY_ID").ok(),
                secret_access_key: std::env::var("S3_SECRET_ACCESS_KEY").ok(),
            }),
            other => panic!("Unknown ASSET_BACKEND '{other}'. Must be one of: local, s3"),
        }
    }

    /// Directory to serve over HTTP when assets live on local disk.
    pub fn local_root(&self) -> Option<&str> {
        match self {
            Self::Local { root, .. } => Some(root),
            Self::S3(_) => None,
        }
    }

    /// Construct the configured backend.
    pub async fn build(&self) -> Arc<dyn AssetStore> {
        match self {
            Self::Local {
                root,
                public_base_url,
            } => Arc::new(LocalAssetStore::new(root.clone(), public_base_url.clone())),
            Self::S3(settings) => Arc::new(S3AssetStore::connect(settings).await),
        }
    }
}
