//! Object storage gateway for product images.
//!
//! The HTTP layer depends only on the [`ObjectStore`] trait. The production
//! implementation is [`supabase::SupabaseStorage`], a thin client for the
//! Supabase Storage REST API.

pub mod config;
pub mod error;
pub mod supabase;

use async_trait::async_trait;

pub use config::StorageConfig;
pub use error::StorageError;
pub use supabase::SupabaseStorage;

/// A bucket of publicly readable blobs addressed by key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Name of the bucket all keys live in.
    fn bucket(&self) -> &str;

    /// Public URL under which `key` is served.
    fn public_url(&self, key: &str) -> String;

    /// Create the bucket if it does not exist yet.
    async fn ensure_bucket(&self) -> Result<(), StorageError>;

    /// Store `bytes` under `key`, replacing any existing blob, and return
    /// the public URL.
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Remove the blob stored under `key`. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Recover the object key from a URL produced by [`Self::public_url`].
    ///
    /// Returns `None` for URLs that point elsewhere (e.g. an image URL typed
    /// in by hand).
    fn key_from_url(&self, url: &str) -> Option<String> {
        let prefix = self.public_url("");
        url.strip_prefix(prefix.as_str())
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }
}
