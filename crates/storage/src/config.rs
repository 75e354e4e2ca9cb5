/// Bucket used when `STORAGE_BUCKET` is not set.
pub const DEFAULT_BUCKET: &str = "product-images";

/// Object storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Project base URL, without a trailing slash.
    pub url: String,
    /// Service role key, sent as both `apikey` and bearer token.
    pub service_role_key: String,
    pub bucket: String,
}

impl StorageConfig {
    pub fn new(
        url: impl Into<String>,
        service_role_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            service_role_key: service_role_key.into(),
            bucket: bucket.into(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                     | Default          |
    /// |-----------------------------|------------------|
    /// | `SUPABASE_URL`              | required         |
    /// | `SUPABASE_SERVICE_ROLE_KEY` | required         |
    /// | `STORAGE_BUCKET`            | `product-images` |
    pub fn from_env() -> Self {
        let url = std::env::var("SUPABASE_URL").expect("SUPABASE_URL must be set");
        let service_role_key = std::env::var("SUPABASE_SERVICE_ROLE_KEY")
            .expect("SUPABASE_SERVICE_ROLE_KEY must be set");
        let bucket = std::env::var("STORAGE_BUCKET")
            .ok()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BUCKET.into());

        Self::new(url, service_role_key, bucket)
    }
}
