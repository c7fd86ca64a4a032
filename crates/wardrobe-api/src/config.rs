use crate::error::AppError;

/// Service configuration loaded explicitly from environment variables.
///
/// The managed backend (auth, storage, row store) shares one base URL and
/// publishable key. Redis is optional; without it the service runs with
/// description caching disabled.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds, e.g. "0.0.0.0:8080"
    pub bind_addr: String,
    /// Base URL of the managed backend
    pub supabase_url: String,
    /// Publishable API key sent alongside every backend call
    pub supabase_anon_key: String,
    /// Storage bucket holding wardrobe photos
    pub storage_bucket: String,
    /// Redis connection URL. `None` disables the description cache.
    pub redis_url: Option<String>,
    /// Model used for stylist search
    pub chat_model: String,
    /// Model used to describe uploaded photos
    pub vision_model: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `SUPABASE_URL`: base URL of the managed backend
    /// - `SUPABASE_ANON_KEY`: publishable API key
    ///
    /// Optional:
    /// - `BIND_ADDR` (default "0.0.0.0:8080")
    /// - `STORAGE_BUCKET` (default "wardrobe-images")
    /// - `REDIS_URL` (omit to disable caching)
    /// - `CHAT_MODEL` (default "gpt-4.1")
    /// - `VISION_MODEL` (default "gpt-4o")
    pub fn from_env() -> Result<Self, AppError> {
        let supabase_url = std::env::var("SUPABASE_URL").map_err(|_| {
            AppError::Config("SUPABASE_URL environment variable is required".to_string())
        })?;

        let supabase_anon_key = std::env::var("SUPABASE_ANON_KEY").map_err(|_| {
            AppError::Config("SUPABASE_ANON_KEY environment variable is required".to_string())
        })?;

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key,
            storage_bucket: std::env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "wardrobe-images".to_string()),
            redis_url: std::env::var("REDIS_URL").ok(),
            chat_model: std::env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4.1".to_string()),
            vision_model: std::env::var("VISION_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
        })
    }
}
