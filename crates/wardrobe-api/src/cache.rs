/// Redis-backed cache for vision descriptions.
///
/// All operations degrade gracefully: any Redis failure logs a warning and
/// behaves as a miss, so the service works fully without Redis.
///
/// Key schema: `wtw:v1:describe:{sha256(image bytes)}` — TTL 7 days.
use redis::AsyncCommands;
use tracing::warn;

const KEY_PREFIX: &str = "wtw:v1:";
const DESCRIBE_TTL_SECS: u64 = 7 * 24 * 3600;

pub struct DescriptionCache {
    client: Option<redis::Client>,
}

impl DescriptionCache {
    /// Build the cache; `None` or an invalid URL yields a no-op cache.
    pub fn new(url: Option<&str>) -> Self {
        let client = url.and_then(|u| {
            redis::Client::open(u)
                .inspect_err(
                    |e| warn!(error = %e, url = u, "failed to create redis client, cache disabled"),
                )
                .ok()
        });
        Self { client }
    }

    /// PING Redis; used for the startup log line.
    pub async fn is_available(&self) -> bool {
        let Some(client) = &self.client else {
            return false;
        };
        match client.get_multiplexed_async_connection().await {
            Ok(mut conn) => {
                let result: Result<String, _> = redis::cmd("PING").query_async(&mut conn).await;
                result.is_ok()
            }
            Err(_) => false,
        }
    }

    pub async fn get_description(&self, digest: &str) -> Option<String> {
        let client = self.client.as_ref()?;
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .inspect_err(|e| warn!(error = %e, "redis connection failed"))
            .ok()?;
        let value: Option<String> = conn
            .get(describe_key(digest))
            .await
            .inspect_err(|e| warn!(error = %e, digest, "redis GET failed"))
            .ok()?;
        value
    }

    pub async fn set_description(&self, digest: &str, description: &str) {
        let Some(client) = &self.client else {
            return;
        };
        let Ok(mut conn) = client
            .get_multiplexed_async_connection()
            .await
            .inspect_err(|e| warn!(error = %e, "redis connection failed"))
        else {
            return;
        };
        if let Err(e) = conn
            .set_ex::<_, _, ()>(describe_key(digest), description, DESCRIBE_TTL_SECS)
            .await
        {
            warn!(error = %e, digest, "redis SETEX failed");
        }
    }
}

fn describe_key(digest: &str) -> String {
    format!("{KEY_PREFIX}describe:{digest}")
}
