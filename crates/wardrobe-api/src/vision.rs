/// Photo description flow.
///
/// Describes an uploaded clothing photo with the vision model. Results are
/// cached by content hash: re-uploading the same bytes (client retries,
/// duplicate photos) reuses the stored description instead of paying for
/// another model call.
use std::sync::Arc;

use base64::Engine as _;
use sha2::{Digest, Sha256};
use tracing::info;

use wardrobe_common::openai::{ChatCompletionRequest, Message, OpenAiClient};

use crate::cache::DescriptionCache;
use crate::error::AppError;
use crate::prompt::DESCRIBE_PROMPT;
use crate::rate_limit::RateLimiter;

pub struct DescribeEngine {
    openai: Arc<OpenAiClient>,
    model: String,
    cache: Arc<DescriptionCache>,
    limiter: Option<RateLimiter>,
}

impl DescribeEngine {
    pub fn new(
        openai: Arc<OpenAiClient>,
        model: String,
        cache: Arc<DescriptionCache>,
        limiter: Option<RateLimiter>,
    ) -> Self {
        Self {
            openai,
            model,
            cache,
            limiter,
        }
    }

    /// Describe an image, consulting the content-hash cache first.
    pub async fn describe(&self, bytes: &[u8], content_type: &str) -> Result<String, AppError> {
        let digest = content_digest(bytes);
        if let Some(cached) = self.cache.get_description(&digest).await {
            info!(digest = %digest, "description cache hit");
            return Ok(cached);
        }

        if let Some(limiter) = &self.limiter {
            limiter.check().await.map_err(AppError::RateLimited)?;
        }

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user_with_image(
                DESCRIBE_PROMPT,
                data_url(bytes, content_type),
            )],
            temperature: None,
            max_tokens: None,
        };
        let response = self.openai.chat_completions(request).await?;
        let description = response.text()?.trim().to_string();
        info!(digest = %digest, bytes = bytes.len(), "photo described");

        self.cache.set_description(&digest, &description).await;
        Ok(description)
    }
}

/// Hex SHA-256 of the raw image bytes.
fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Inline data URL in the form the vision endpoint accepts.
fn data_url(bytes: &[u8], content_type: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{content_type};base64,{encoded}")
}
