mod cache;
mod config;
mod error;
mod prompt;
mod rate_limit;
mod search;
mod server;
mod vision;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use wardrobe_common::auth::AuthClient;
use wardrobe_common::database::ItemStore;
use wardrobe_common::openai::{OpenAiClient, OpenAiClientConfig};
use wardrobe_common::storage::StorageClient;

use cache::DescriptionCache;
use config::Config;
use rate_limit::RateLimiter;
use search::StylistEngine;
use server::{build_router, AppContext};
use vision::DescribeEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("starting wardrobe-api");

    // 1. Load config from environment
    let config = Config::from_env()?;
    info!(
        bind_addr = %config.bind_addr,
        backend = %config.supabase_url,
        bucket = %config.storage_bucket,
        redis = config.redis_url.is_some(),
        chat_model = %config.chat_model,
        vision_model = %config.vision_model,
        "configuration loaded"
    );

    // 2. Inference client
    let openai_config = OpenAiClientConfig::from_env();
    info!(
        base_url = %openai_config.base_url,
        timeout_ms = openai_config.default_timeout.as_millis(),
        max_retries = openai_config.max_retries,
        "openai client configured"
    );
    let openai = Arc::new(OpenAiClient::new(openai_config)?);

    // 3. Redis-backed description cache (optional, degrades gracefully)
    let cache = Arc::new(DescriptionCache::new(config.redis_url.as_deref()));
    if cache.is_available().await {
        info!("redis connected");
    } else {
        info!("redis unavailable, running without description cache");
    }

    // 4. Inference rate gate
    let limiter = RateLimiter::from_env();
    if limiter.is_some() {
        info!("inference rate limiting enabled");
    }

    let stylist = Arc::new(StylistEngine::new(
        Arc::clone(&openai),
        config.chat_model.clone(),
        limiter.clone(),
    ));
    let describe = Arc::new(DescribeEngine::new(
        Arc::clone(&openai),
        config.vision_model.clone(),
        Arc::clone(&cache),
        limiter,
    ));

    // 5. Managed-backend clients; the caller's token is forwarded per request
    let ctx = AppContext {
        auth: AuthClient::new(&config.supabase_url, &config.supabase_anon_key)?,
        storage: StorageClient::new(
            &config.supabase_url,
            &config.supabase_anon_key,
            &config.storage_bucket,
        )?,
        items: ItemStore::new(&config.supabase_url, &config.supabase_anon_key)?,
        stylist,
        describe,
    };

    // 6. Serve
    let app = build_router(ctx);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "wardrobe-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
