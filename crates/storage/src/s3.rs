//! S3-compatible asset store.
//!
//! Works against AWS S3 and S3-compatible services (MinIO, R2, Supabase
//! storage) via a custom endpoint and path-style addressing.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use crate::{check_path, join_url, AssetStore, StorageError};

/// Connection settings for [`S3AssetStore`].
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services.
    pub endpoint: Option<String>,
    /// Base URL objects are publicly served from.
    pub public_base_url: String,
    /// Static credentials; the default provider chain is used when absent.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

pub struct S3AssetStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3AssetStore {
    /// Build a client from settings, loading the shared AWS config.
    pub async fn connect(settings: &S3Settings) -> Self {
        let mut loader = aws_config::from_env()
            .region(aws_config::Region::new(settings.region.clone()));
        if let (Some(key), Some(secret)) = (&settings.access_key_id, &settings.secret_access_key) {
            loader = loader.credentials_provider(aws_credential_types::Credentials::new(
                key.clone(),
                secret.clone(),
                None,
                None,
                "folio-static",
            ));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            bucket: settings.bucket.clone(),
            public_base_url: settings.public_base_url.clone(),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                let not_found = err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false);
                if not_found {
                    Ok(false)
                } else {
                    Err(StorageError::Remote(err.to_string()))
                }
            }
        }
    }
}

#[async_trait]
impl AssetStore for S3AssetStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<String, StorageError> {
        check_path(path)?;
        if !upsert && self.exists(path).await? {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }

        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Remote(e.to_string()))?;

        tracing::debug!(bucket = %self.bucket, path, size, "Uploaded asset to object store");
        Ok(self.public_url(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        check_path(path)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| StorageError::Remote(e.to_string()))?;

        tracing::debug!(bucket = %self.bucket, path, "Deleted asset from object store");
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        join_url(&self.public_base_url, path)
    }
}
