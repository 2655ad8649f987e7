//! Object storage service for event cover and product images.
//!
//! Supports two providers:
//! - `console`: logs the upload and returns the public URL it would have
//!   produced (development)
//! - `http`: PUTs the object to an S3-compatible endpoint

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;

use crate::config::StorageConfig;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage service not configured")]
    NotConfigured,

    #[error("Upload failed: {0}")]
    UploadFailed(String),
}

/// Object storage client. Accepts a binary file plus a target path and
/// returns a publicly retrievable URL.
#[derive(Clone)]
pub struct MediaStorage {
    config: Arc<StorageConfig>,
    client: reqwest::Client,
}

impl MediaStorage {
    /// Creates a new MediaStorage with the given configuration.
    pub fn new(config: StorageConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_default();
        Self {
            config: Arc::new(config),
            client,
        }
    }

    /// Uploads an object and returns its public URL.
    pub async fn upload(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        match self.config.provider.as_str() {
            "console" => {
                debug!(path = %path, size = bytes.len(), "Console storage provider: skipping upload");
                Ok(self.public_url(path))
            }
            "http" => self.upload_http(path, content_type, bytes).await,
            provider => {
                error!(provider = %provider, "Unknown storage provider");
                Err(StorageError::NotConfigured)
            }
        }
    }

    /// The fallback URL recorded when a cover image upload fails.
    pub fn placeholder_url(&self) -> String {
        self.config.placeholder_url.clone()
    }

    /// Builds a collision-free object path under the producer's prefix.
    pub fn object_path(producer_id: Uuid, filename: &str) -> String {
        let safe: String = filename
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("media/{}/{}-{}", producer_id, Uuid::new_v4(), safe)
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            path
        )
    }

    async fn upload_http(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        if self.config.endpoint.trim().is_empty() {
            return Err(StorageError::NotConfigured);
        }
        let url = format!("{}/{}", self.config.endpoint.trim_end_matches('/'), path);

        let response = self
            .client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type.to_string())
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::UploadFailed(format!(
                "storage endpoint returned {}",
                response.status()
            )));
        }

        Ok(self.public_url(path))
    }
}
