//! Endpoint transport abstraction.
//!
//! The invoker only needs "send this payload to that endpoint and hand me the decoded
//! body". [`HttpTransport`] does that over HTTPS; tests substitute scripted
//! implementations.

mod errors;
mod http;

pub use errors::classify_http_error;
pub use http::HttpTransport;

use serde_json::Value;

use crate::error::LlmError;
use crate::types::GenerateContentRequest;

/// One delivery attempt against a generative endpoint.
///
/// Implementations perform exactly one request per call and never retry on their own.
/// Transport faults map to [`LlmError::HttpError`]; non-success statuses map to
/// [`LlmError::ApiError`].
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        payload: &GenerateContentRequest,
        endpoint_id: &str,
    ) -> Result<Value, LlmError>;
}
