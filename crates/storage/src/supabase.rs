//! REST client for Supabase Storage.
//!
//! Endpoints used:
//!
//! ```text
//! GET    /storage/v1/bucket                   list buckets
//! POST   /storage/v1/bucket                   create bucket
//! POST   /storage/v1/object/{bucket}/{key}    upload (x-upsert)
//! DELETE /storage/v1/object/{bucket}          remove { prefixes: [key] }
//!        /storage/v1/object/public/{bucket}/{key}   public read URL
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::ObjectStore;

/// Timeout for a single storage request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for one Supabase Storage bucket.
pub struct SupabaseStorage {
    client: reqwest::Client,
    config: StorageConfig,
}

#[derive(Debug, Deserialize)]
struct BucketInfo {
    name: String,
}

impl SupabaseStorage {
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: StorageConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/storage/v1/{path}", self.config.url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
    }

    async fn list_buckets(&self) -> Result<Vec<BucketInfo>, StorageError> {
        let response = self
            .authorized(self.client.get(self.endpoint("bucket")))
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    // ---- private helpers ----

    /// Return the response unchanged on a 2xx status, otherwise a
    /// [`StorageError::Api`] carrying the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, StorageError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ObjectStore for SupabaseStorage {
    fn bucket(&self) -> &str {
        &self.config.bucket
    }

    fn public_url(&self, key: &str) -> String {
        self.endpoint(&format!("object/public/{}/{key}", self.config.bucket))
    }

    async fn ensure_bucket(&self) -> Result<(), StorageError> {
        let bucket = &self.config.bucket;
        if self.list_buckets().await?.iter().any(|b| &b.name == bucket) {
            tracing::debug!(bucket, "Storage bucket exists");
            return Ok(());
        }

        let body = serde_json::json!({
            "id": bucket,
            "name": bucket,
            "public": true,
        });
        let response = self
            .authorized(self.client.post(self.endpoint("bucket")))
            .json(&body)
            .send()
            .await?;
        Self::ensure_success(response).await?;

        tracing::info!(bucket, "Storage bucket created");
        Ok(())
    }

    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let size = bytes.len();
        let url = self.endpoint(&format!("object/{}/{key}", self.config.bucket));
        let response = self
            .authorized(self.client.post(url))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await?;
        Self::ensure_success(response).await?;

        tracing::info!(key, size, "Object uploaded");
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let body = serde_json::json!({ "prefixes": [key] });
        let response = self
            .authorized(
                self.client
                    .delete(self.endpoint(&format!("object/{}", self.config.bucket))),
            )
            .json(&body)
            .send()
            .await?;
        Self::ensure_success(response).await?;

        tracing::info!(key, "Object removed");
        Ok(())
    }
}
