//! Exponential backoff for fallible async operations.
//!
//! The core fetch path makes a single bounded request and never retries.
//! Callers that want retries wrap their own operations with
//! [`retry_with_backoff`].

use crate::Result;
use std::future::Future;
use tokio::time::{Duration, sleep};
use tracing::debug;

/// Backoff schedule for [`retry_with_backoff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub factor: u32,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            factor: 2,
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (zero-based), capped at `max_delay`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let multiplier = self.factor.saturating_pow(retry);
        self.base_delay
            .saturating_mul(multiplier)
            .min(self.max_delay)
    }
}

/// Run `op` until it succeeds, fails permanently, or retries run out.
///
/// Only errors for which [`Error::is_recoverable`](crate::Error::is_recoverable)
/// is true are retried. The last error is returned on exhaustion.
///
/// # Errors
///
/// Returns the first non-recoverable error, or the final recoverable one once
/// `policy.max_retries` retries have been spent.
pub async fn retry_with_backoff<T, F, Fut>(mut op: F, policy: RetryPolicy) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut retry = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_recoverable() && retry < policy.max_retries => {
                let delay = policy.delay_for(retry);
                debug!(attempt = retry + 1, ?delay, error = %e, "retrying after recoverable error");
                sleep(delay).await;
                retry += 1;
            },
            Err(e) => return Err(e),
        }
    }
}
