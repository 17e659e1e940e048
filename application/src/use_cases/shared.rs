//! Shared utilities for use cases.
//!
//! Cancellation checking and bounded waiting used by the round controller
//! and the orchestrator.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How a bounded wait ended
#[derive(Debug)]
pub(crate) enum Bounded<T> {
    Done(T),
    TimedOut,
    Cancelled,
}

/// Race `future` against the cancellation token and an optional time limit.
///
/// Cancellation wins ties so a cancelled team stops at the next suspension
/// point even if the awaited call is already complete.
pub(crate) async fn run_bounded<F>(
    token: &CancellationToken,
    limit: Option<Duration>,
    future: F,
) -> Bounded<F::Output>
where
    F: Future,
{
    match limit {
        Some(limit) => tokio::select! {
            biased;
            _ = token.cancelled() => Bounded::Cancelled,
            result = tokio::time::timeout(limit, future) => match result {
                Ok(value) => Bounded::Done(value),
                Err(_) => Bounded::TimedOut,
            },
        },
        None => tokio::select! {
            biased;
            _ = token.cancelled() => Bounded::Cancelled,
            value = future => Bounded::Done(value),
        },
    }
}

/// Best-effort text of a task panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
