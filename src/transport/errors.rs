//! HTTP failure classification

use reqwest::header::HeaderMap;

use crate::error::LlmError;

const REQUEST_ID_HEADERS: [&str; 5] = [
    "x-request-id",
    "x-goog-request-id",
    "x-trace-id",
    "traceparent",
    "x-correlation-id",
];

/// Turn a non-success response into an [`LlmError::ApiError`].
///
/// The message prefers the endpoint's `error.message` envelope, then the status reason,
/// then a body sample. `details` keeps the status, the parsed (or raw) body and any
/// request identifiers for diagnostics.
pub fn classify_http_error(status: u16, body_text: &str, headers: &HeaderMap) -> LlmError {
    let request_ids: Vec<String> = REQUEST_ID_HEADERS
        .iter()
        .filter_map(|name| {
            headers
                .get(*name)
                .and_then(|v| v.to_str().ok())
                .map(|v| format!("{name}={v}"))
        })
        .collect();

    // Keep log lines bounded
    let body_sample: String = body_text.chars().take(200).collect();
    let parsed = serde_json::from_str::<serde_json::Value>(body_text).ok();

    let envelope_message = parsed
        .as_ref()
        .and_then(|v| v.pointer("/error/message"))
        .and_then(|m| m.as_str())
        .map(str::to_string);
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_string);

    let message = envelope_message
        .or(reason)
        .unwrap_or_else(|| {
            if body_sample.trim().is_empty() {
                "api error".to_string()
            } else {
                body_sample.clone()
            }
        });

    let details = match parsed {
        Some(json) => serde_json::json!({
            "status": status,
            "response": json,
            "request_ids": request_ids,
        }),
        None => serde_json::json!({
            "status": status,
            "raw": body_sample,
            "request_ids": request_ids,
        }),
    };

    LlmError::api_error_with_details(status, message, details)
}
