//! Structured-object extraction from free-form model replies.
//!
//! The endpoint is asked for JSON but may wrap the object in prose or a code fence.
//! [`extract`] takes everything from the first `{` to the last `}` of the trimmed text
//! and parses that span strictly. Braces in the surrounding prose can widen the span
//! and make the parse fail; that case is reported, not repaired.

mod record;

pub use record::Record;

use thiserror::Error;

/// Failure to obtain a structured object from reply text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No `{ ... }` span exists in the text.
    #[error("No valid JSON object found in the response.")]
    NoJsonObject,
    /// A span was found but is not valid JSON; carries the parser message.
    #[error("The AI response was not in the expected JSON format. {0}")]
    InvalidJson(String),
}

/// Extract the single JSON object embedded in `text`.
///
/// All-or-nothing: either the whole span parses into a [`Record`] or an error is
/// returned. No field-level checks happen here.
pub fn extract(text: &str) -> Result<Record, ExtractionError> {
    let span = object_span(text).ok_or_else(|| {
        tracing::warn!(len = text.len(), "no JSON object delimiters in response");
        ExtractionError::NoJsonObject
    })?;

    serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(span)
        .map(Record::from)
        .map_err(|e| {
            tracing::warn!(error = %e, "response JSON span failed to parse");
            ExtractionError::InvalidJson(e.to_string())
        })
}

/// First `{` through last `}` of the trimmed text, inclusive.
fn object_span(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    // "} ... {" has both delimiters but no object between them
    if end < start {
        return None;
    }
    Some(&trimmed[start..=end])
}
