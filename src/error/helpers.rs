//! User-facing error helpers.
//!
//! The view layer treats every failure as an opaque signal to render. These helpers
//! give it a coarse kind, an optional status and a message it can show as-is.

use std::fmt::Write;

use super::types::{ErrorCategory, LlmError};

/// Error kind for presentation (coarse-grained)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    RateLimit,
    Client,
    Server,
    Network,
    Unavailable,
    Parsing,
    Audio,
    Validation,
    Configuration,
    Unknown,
}

/// Structured error summary for UI consumption
#[derive(Debug, Clone)]
pub struct ErrorSummary {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    /// Message suitable for direct display
    pub message: String,
    /// Optional opaque JSON details (e.g. the provider error body)
    pub details: Option<serde_json::Value>,
    pub suggestions: Vec<String>,
}

/// Summarize an error for display.
pub fn summarize_error(err: &LlmError) -> ErrorSummary {
    ErrorSummary {
        kind: map_error_kind(err),
        status: err.status_code(),
        message: err.to_string(),
        details: match err {
            LlmError::ApiError { details, .. } => details.clone(),
            _ => None,
        },
        suggestions: suggest_fixes(err),
    }
}

/// Map an error to its presentation kind.
pub fn map_error_kind(err: &LlmError) -> ErrorKind {
    match err.category() {
        ErrorCategory::Authentication => ErrorKind::Auth,
        ErrorCategory::RateLimit => ErrorKind::RateLimit,
        ErrorCategory::Client => ErrorKind::Client,
        ErrorCategory::Server => ErrorKind::Server,
        ErrorCategory::Network => ErrorKind::Network,
        ErrorCategory::Exhausted => ErrorKind::Unavailable,
        ErrorCategory::Parsing => ErrorKind::Parsing,
        ErrorCategory::Audio => ErrorKind::Audio,
        ErrorCategory::Validation => ErrorKind::Validation,
        ErrorCategory::Configuration => ErrorKind::Configuration,
        ErrorCategory::Internal => ErrorKind::Unknown,
    }
}

/// Suggest fixes based on the error category.
pub fn suggest_fixes(err: &LlmError) -> Vec<String> {
    let mut tips = Vec::new();
    match err.category() {
        ErrorCategory::Exhausted | ErrorCategory::Network | ErrorCategory::Server => {
            tips.push("Check the network connection and try again".to_string());
        }
        ErrorCategory::Authentication => {
            tips.push("Verify the API key".to_string());
        }
        ErrorCategory::RateLimit => {
            tips.push("Wait a moment before sending another request".to_string());
        }
        ErrorCategory::Parsing => {
            tips.push("Ask again; the model reply was not in the requested format".to_string());
        }
        ErrorCategory::Audio => {
            tips.push("Request the audio again".to_string());
        }
        ErrorCategory::Validation | ErrorCategory::Client => {
            tips.push("Check request parameters and required fields".to_string());
        }
        ErrorCategory::Configuration => {
            tips.push("Check client configuration".to_string());
        }
        ErrorCategory::Internal => {}
    }
    tips
}

/// Render a CLI-friendly string for an `ErrorSummary`.
pub fn format_summary(summary: &ErrorSummary, verbose: bool) -> String {
    let mut out = String::new();
    if let Some(code) = summary.status {
        let _ = writeln!(out, "Status: {code}");
    }
    let _ = writeln!(out, "Message: {}", summary.message);
    if !summary.suggestions.is_empty() {
        out.push_str("Suggestions:\n");
        for s in &summary.suggestions {
            let _ = writeln!(out, "  - {s}");
        }
    }
    if verbose && let Some(d) = &summary.details {
        let _ = writeln!(out, "Details: {d}");
    }
    out
}
