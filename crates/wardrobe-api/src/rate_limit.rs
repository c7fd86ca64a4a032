/// Token-bucket gate on inference calls.
///
/// The hosted model API is the only metered dependency, so the gate sits in
/// front of the stylist and describe engines rather than the HTTP layer.
/// Disabled unless `RATE_LIMIT_RPS` is set.
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

#[derive(Clone)]
pub struct RateLimiter {
    rps: u32,
    state: std::sync::Arc<Mutex<State>>,
}

#[derive(Debug)]
struct State {
    tokens: f64,
    last: Instant,
}

impl RateLimiter {
    pub fn from_env() -> Option<Self> {
        let rps = std::env::var("RATE_LIMIT_RPS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&n| n > 0)?;
        Some(Self::with_rps(rps))
    }

    fn with_rps(rps: u32) -> Self {
        Self {
            rps,
            state: std::sync::Arc::new(Mutex::new(State {
                tokens: rps as f64,
                last: Instant::now(),
            })),
        }
    }

    /// Take one token, or report roughly how long until one is available.
    pub async fn check(&self) -> Result<(), String> {
        let mut state = self.state.lock().await;
        let now = Instant::now();
        let elapsed = now.duration_since(state.last);
        state.last = now;

        let refill = (elapsed.as_secs_f64() * self.rps as f64).min(self.rps as f64);
        state.tokens = (state.tokens + refill).min(self.rps as f64);

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            return Ok(());
        }

        let wait = Duration::from_secs_f64((1.0 - state.tokens) / self.rps as f64);
        Err(format!(
            "model call budget exhausted (RATE_LIMIT_RPS={}): try again in ~{}ms",
            self.rps,
            wait.as_millis()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_burst_beyond_budget_is_rejected() {
        let limiter = RateLimiter::with_rps(2);
        assert!(limiter.check().await.is_ok());
        assert!(limiter.check().await.is_ok());
        // third call in the same instant exceeds the bucket
        assert!(limiter.check().await.is_err());
    }
}
