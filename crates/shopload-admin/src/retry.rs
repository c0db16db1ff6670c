//! Exponential back-off with jitter for Admin API calls.
//!
//! The Admin REST API throttles with a leaky bucket and answers `429` with a
//! `Retry-After` header. A `429` means the request was rejected, so it is
//! retried for every method. Transport failures and `5xx` are retried only
//! for idempotent requests: a timed-out `POST` may already have been applied.
//! Validation failures (`4xx`) and malformed bodies are returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::AdminError;

const MAX_DELAY_MS: u64 = 30_000;

/// Returns `true` for errors worth retrying after a back-off delay.
pub(crate) fn is_retriable(err: &AdminError, idempotent: bool) -> bool {
    match err {
        AdminError::RateLimited { .. } => true,
        AdminError::Http(e) => {
            idempotent
                && (e.is_timeout()
                    || e.is_connect()
                    || e.status().is_some_and(|s| s.is_server_error()))
        }
        AdminError::Api { status, .. } => idempotent && *status >= 500,
        AdminError::Deserialize { .. }
        | AdminError::InvalidBaseUrl { .. }
        | AdminError::PaginationLimit { .. } => false,
    }
}

/// Delay before retry number `attempt` (1-based): `base * 2^(attempt-1)`,
/// capped, with ±25 % jitter. A `Retry-After` hint is honoured as a floor.
fn backoff_delay_ms(backoff_base_ms: u64, attempt: u32, err: &AdminError) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
    let capped = computed.min(MAX_DELAY_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
    match err {
        AdminError::RateLimited {
            retry_after_secs, ..
        } => jittered.max(retry_after_secs.saturating_mul(1_000)),
        _ => jittered,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient
/// errors. Non-retriable errors are returned immediately; see [`is_retriable`]
/// for what `idempotent` changes.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    idempotent: bool,
    mut operation: F,
) -> Result<T, AdminError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AdminError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err, idempotent) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = backoff_delay_ms(backoff_base_ms, attempt, &err);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "Admin API transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
