//! Response body types.
//!
//! The invoker returns the raw body untouched; these types are for callers that
//! want to read the first candidate's text or inline audio out of it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::request::{Blob, Content};
use crate::error::LlmError;

/// Generate Content Response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidate responses from the model.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Returns the prompt's feedback related to the content filters.
    #[serde(skip_serializing_if = "Option::is_none", rename = "promptFeedback")]
    pub prompt_feedback: Option<Value>,
    /// Output only. Metadata on the generation requests' token usage.
    #[serde(skip_serializing_if = "Option::is_none", rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
    /// Output only. The model version used to generate the response.
    #[serde(skip_serializing_if = "Option::is_none", rename = "modelVersion")]
    pub model_version: Option<String>,
}

impl GenerateContentResponse {
    /// Interpret a raw response body.
    pub fn from_value(body: &Value) -> Result<Self, LlmError> {
        Self::deserialize(body)
            .map_err(|e| LlmError::ParseError(format!("unexpected response shape: {e}")))
    }

    /// `candidates[0].content.parts[0].text`
    pub fn first_text(&self) -> Option<&str> {
        self.first_content()?.parts.first()?.text.as_deref()
    }

    /// First inline data part of the first candidate.
    pub fn first_inline_data(&self) -> Option<&Blob> {
        self.first_content()?
            .parts
            .iter()
            .find_map(|p| p.inline_data.as_ref())
    }

    fn first_content(&self) -> Option<&Content> {
        self.candidates.first()?.content.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "finishReason")]
    pub finish_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
}

/// Metadata on the generation requests' token usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    #[serde(skip_serializing_if = "Option::is_none", rename = "promptTokenCount")]
    pub prompt_token_count: Option<i32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        rename = "candidatesTokenCount"
    )]
    pub candidates_token_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "totalTokenCount")]
    pub total_token_count: Option<i32>,
}
