//! Retry with exponential back-off and jitter for chat-completion calls.

use std::future::Future;
use std::time::Duration;

use crate::error::LlmError;

/// Transient failures worth retrying: network-level timeouts and connection
/// errors, plus any 5xx from the provider. Client errors (bad key, bad
/// request) and empty completions are returned immediately.
pub(crate) fn is_retriable(err: &LlmError) -> bool {
    match err {
        LlmError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        LlmError::Api { status, .. } => status.is_server_error(),
        LlmError::EmptyCompletion { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// transient errors. The delay before attempt `n` is
/// `backoff_base_ms × 2ⁿ⁻¹ ± 25%` jitter, capped at 60 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "chat completion transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use reqwest::StatusCode;

    use super::*;

    fn api_error(status: StatusCode) -> LlmError {
        LlmError::Api {
            provider: "openai",
            status,
            message: "boom".to_owned(),
        }
    }

    #[test]
    fn client_errors_are_not_retriable() {
        assert!(!is_retriable(&api_error(StatusCode::UNAUTHORIZED)));
        assert!(!is_retriable(&api_error(StatusCode::BAD_REQUEST)));
    }

    #[test]
    fn server_errors_are_retriable() {
        assert!(is_retriable(&api_error(StatusCode::INTERNAL_SERVER_ERROR)));
        assert!(is_retriable(&api_error(StatusCode::SERVICE_UNAVAILABLE)));
    }

    #[test]
    fn empty_completion_is_not_retriable() {
        assert!(!is_retriable(&LlmError::EmptyCompletion {
            provider: "openai"
        }));
    }

    #[tokio::test]
    async fn retries_server_errors_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err(api_error(StatusCode::BAD_GATEWAY))
                } else {
                    Ok("answer".to_owned())
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), "answer");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_unauthorized() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<String, _>(api_error(StatusCode::UNAUTHORIZED))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(LlmError::Api { .. })));
    }
}
