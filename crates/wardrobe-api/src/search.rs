/// Stylist search flow.
///
/// Sends the user's query plus the full wardrobe snapshot to the chat model
/// and parses the tagged reply into structured advice. The parse step is
/// total; only the upstream call can fail, and those failures propagate
/// unchanged.
use std::sync::Arc;

use tracing::info;

use wardrobe_common::openai::{ChatCompletionRequest, Message, OpenAiClient};
use wardrobe_core::model::{ParsedSearchResponse, WardrobeItem};
use wardrobe_core::parser::parse_search_response;

use crate::error::AppError;
use crate::prompt;
use crate::rate_limit::RateLimiter;

pub struct StylistEngine {
    openai: Arc<OpenAiClient>,
    model: String,
    limiter: Option<RateLimiter>,
}

impl StylistEngine {
    pub fn new(openai: Arc<OpenAiClient>, model: String, limiter: Option<RateLimiter>) -> Self {
        Self {
            openai,
            model,
            limiter,
        }
    }

    /// Run a stylist search over the caller's wardrobe snapshot.
    pub async fn search(
        &self,
        query: &str,
        wardrobe: &[WardrobeItem],
    ) -> Result<ParsedSearchResponse, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::BadRequest("no search query provided".to_string()));
        }
        if wardrobe.is_empty() {
            return Err(AppError::BadRequest(
                "no wardrobe items to search".to_string(),
            ));
        }
        if let Some(limiter) = &self.limiter {
            limiter.check().await.map_err(AppError::RateLimited)?;
        }

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt::search_prompt(query, wardrobe))],
            temperature: None,
            max_tokens: None,
        };
        let response = self.openai.chat_completions(request).await?;
        let text = response.text()?;
        info!(
            items = wardrobe.len(),
            reply_bytes = text.len(),
            "stylist reply received"
        );

        Ok(parse_search_response(text, wardrobe))
    }
}
