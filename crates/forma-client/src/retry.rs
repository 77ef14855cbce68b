//! Retry logic with exponential backoff for backend reads.
//!
//! Only transient transport failures (connection refused, timeouts) are
//! retried. Responses with error status codes reach the caller on the first
//! attempt, and writes are never routed through here because the backend
//! offers no idempotency keys.

use std::time::Duration;

/// Retry attempts after the initial request.
const MAX_RETRIES: u32 = 3;

/// Base delay before the first retry; doubles each attempt.
const BASE_DELAY_MS: u64 = 200;

/// Delay before retry number `attempt` (zero-based): 200ms, 400ms, 800ms.
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS << attempt)
}

/// Send an HTTP request, retrying transport errors with exponential backoff.
///
/// `send` is called up to `MAX_RETRIES + 1` times. Each call must build a
/// fresh request; [`reqwest::Response`] errors at the status level are the
/// caller's problem.
pub(crate) async fn send_with_retry<F, Fut>(send: F) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        match send().await {
            Ok(resp) => return Ok(resp),
            Err(e) if attempt < MAX_RETRIES => {
                let delay = backoff_delay(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries = MAX_RETRIES,
                    "backend request failed, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
