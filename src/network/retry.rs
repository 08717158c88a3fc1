//! Retry logic with exponential backoff
//!
//! Only used while bringing the keeper up. Cycles themselves never retry; a
//! failed cycle is simply repeated on the next tick.

use std::time::Duration;
use anyhow::Result;
use tracing::warn;
use crate::errors::{KeeperError, BotResult};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: u32,
    /// Fraction of each delay randomly added or removed.
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            multiplier: 2,
            jitter: 0.1,
        }
    }
}

impl RetryConfig {
    /// Delay after the given failed attempt (1-based), before jitter.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(attempt.saturating_sub(1));
        self.initial_delay.saturating_mul(factor).min(self.max_delay)
    }

    fn jittered(&self, delay: Duration) -> Duration {
        let spread = self.jitter.clamp(0.0, 1.0);
        if spread == 0.0 {
            return delay;
        }
        delay.mul_f64(1.0 + rand::random_range(-spread..=spread))
    }
}

/// Runs `operation` until it succeeds or `max_attempts` is used up. The last
/// error is kept as the source of the returned `Rpc` error.
pub async fn retry_with_backoff<F, Fut, T>(
    operation: F,
    config: &RetryConfig,
    context: &'static str,
) -> BotResult<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let attempts = config.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if attempt >= attempts {
            return Err(KeeperError::Rpc {
                operation: context,
                message: format!("failed after {} attempts: {}", attempt, error),
                source: Some(error),
            });
        }

        let delay = config.jittered(config.base_delay(attempt));
        warn!("⚠️ {} failed ({}/{}): {}. Retrying in {:?}", context, attempt, attempts, error, delay);
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
