//! Write retry with exponential backoff.
//!
//! Only transient contention (`SQLITE_BUSY`, `SQLITE_LOCKED`) is retried.
//! Each attempt is a whole transaction, so a retried write is an idempotent
//! upsert of the same row.

use arena_application::StoreError;
use rusqlite::ErrorCode;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry budget for store writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each later one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Sleep before retry `retry` (1-based): base, 2×base, 4×base, …
    pub fn delay_before_retry(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1 << exponent)
    }
}

/// Outcome of a failed attempt
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AttemptError {
    Transient(String),
    Fatal(String),
}

impl From<rusqlite::Error> for AttemptError {
    fn from(error: rusqlite::Error) -> Self {
        match &error {
            rusqlite::Error::SqliteFailure(failure, _)
                if matches!(
                    failure.code,
                    ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
                ) =>
            {
                AttemptError::Transient(error.to_string())
            }
            _ => AttemptError::Fatal(error.to_string()),
        }
    }
}

/// Run `attempt` until it succeeds, fails fatally, or the budget is spent.
///
/// Sleeps happen on the runtime between attempts; nothing is locked while
/// waiting.
pub(crate) async fn with_write_retry<T, F, Fut>(
    policy: RetryPolicy,
    operation: &'static str,
    mut attempt: F,
) -> Result<T, StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        match attempt().await {
            Ok(value) => {
                if attempts > 1 {
                    debug!(operation, attempts, "Write succeeded after retry");
                }
                return Ok(value);
            }
            Err(AttemptError::Fatal(message)) => {
                warn!(operation, attempts, "Write rejected: {}", message);
                return Err(StoreError::rejected(operation, message));
            }
            Err(AttemptError::Transient(message)) => {
                if attempts > policy.max_retries {
                    warn!(operation, attempts, "Write retries exhausted: {}", message);
                    return Err(StoreError::write_exhausted(operation, attempts, message));
                }
                let delay = policy.delay_before_retry(attempts);
                warn!(
                    operation,
                    attempt = attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Database busy, retrying: {}",
                    message
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
