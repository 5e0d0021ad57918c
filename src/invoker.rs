//! Resilient invocation of a generative endpoint.
//!
//! [`Invoker::invoke`] sends one payload with bounded retries. With the default policy that
//! means at most three attempts, with pauses of 1 s and then 2 s between them. Every
//! transport fault and every non-success status counts as a failed attempt. Individual
//! failures are only logged. Once the budget is spent the caller gets a single
//! [`LlmError::RetriesExhausted`].

use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;

use crate::error::LlmError;
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::transport::Transport;
use crate::types::GenerateContentRequest;

/// Sends payloads through a [`Transport`] with bounded retry.
///
/// Holds no per-call state, so one invoker can serve any number of concurrent calls.
#[derive(Clone)]
pub struct Invoker {
    transport: Arc<dyn Transport>,
    retry: RetryExecutor,
}

impl std::fmt::Debug for Invoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invoker")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl Invoker {
    /// Invoker with the default policy: 3 attempts, 1 s initial backoff, doubling.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_retry_policy(transport, RetryPolicy::default())
    }

    pub fn with_retry_policy(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            retry: RetryExecutor::new(policy),
        }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        self.retry.policy()
    }

    /// Send `payload` to `endpoint_id` and return the decoded response body unmodified.
    ///
    /// An empty payload or endpoint id is rejected with [`LlmError::InvalidInput`] before
    /// any network call.
    pub async fn invoke(
        &self,
        payload: &GenerateContentRequest,
        endpoint_id: &str,
    ) -> Result<Value, LlmError> {
        if payload.is_empty() {
            return Err(LlmError::InvalidInput(
                "request payload has no content".to_string(),
            ));
        }
        if endpoint_id.trim().is_empty() {
            return Err(LlmError::InvalidInput("endpoint id is empty".to_string()));
        }

        let span = tracing::info_span!(
            "invoke",
            endpoint = endpoint_id,
            invocation_id = %uuid::Uuid::new_v4()
        );

        async {
            let mut attempt = 0u32;
            let result = self
                .retry
                .execute(|| {
                    attempt += 1;
                    tracing::debug!(attempt, "sending request");
                    self.transport.send(payload, endpoint_id)
                })
                .await;

            match &result {
                Ok(_) => tracing::info!(attempts = attempt, "invocation succeeded"),
                Err(error) => tracing::error!(attempts = attempt, %error, "invocation failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}
