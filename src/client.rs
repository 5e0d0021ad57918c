//! High-level client composing invocation, extraction and audio decoding.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

use crate::audio::{self, AudioContainer};
use crate::error::LlmError;
use crate::extract::{self, Record};
use crate::invoker::Invoker;
use crate::types::{GenerateContentRequest, GenerateContentResponse};
use crate::utils::mime::parse_sample_rate;

const FIRST_TEXT_PATH: &str = "candidates[0].content.parts[0].text";

/// Client for a generative endpoint.
///
/// Each method performs one invocation (with retries) and then decodes the reply:
///
/// - [`generate_text`](Self::generate_text): the first candidate's text
/// - [`generate_record`](Self::generate_record): the JSON object embedded in that text
/// - [`generate_structured`](Self::generate_structured): the same object as a caller type
/// - [`synthesize_speech`](Self::synthesize_speech): the inline PCM reply as WAV
#[derive(Clone)]
pub struct GenAiClient {
    invoker: Invoker,
    /// Keeps the log writer alive when the builder installed a subscriber
    _tracing_guard: Option<Arc<WorkerGuard>>,
}

impl std::fmt::Debug for GenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiClient")
            .field("invoker", &self.invoker)
            .finish_non_exhaustive()
    }
}

impl GenAiClient {
    pub fn new(invoker: Invoker) -> Self {
        Self {
            invoker,
            _tracing_guard: None,
        }
    }

    /// Start building a client backed by the HTTPS transport.
    pub fn builder() -> crate::builder::GenAiClientBuilder {
        crate::builder::GenAiClientBuilder::new()
    }

    pub(crate) fn set_tracing_guard(&mut self, guard: Option<WorkerGuard>) {
        self._tracing_guard = guard.map(Arc::new);
    }

    pub fn invoker(&self) -> &Invoker {
        &self.invoker
    }

    /// Raw decoded response body.
    pub async fn invoke(
        &self,
        payload: &GenerateContentRequest,
        endpoint_id: &str,
    ) -> Result<Value, LlmError> {
        self.invoker.invoke(payload, endpoint_id).await
    }

    /// Text of the first part of the first candidate.
    pub async fn generate_text(
        &self,
        payload: &GenerateContentRequest,
        endpoint_id: &str,
    ) -> Result<String, LlmError> {
        let response = self.generate(payload, endpoint_id).await?;
        response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| LlmError::MissingField(FIRST_TEXT_PATH.to_string()))
    }

    /// The JSON object embedded in the reply text.
    ///
    /// When the payload carries a response schema the record is also checked against it.
    pub async fn generate_record(
        &self,
        payload: &GenerateContentRequest,
        endpoint_id: &str,
    ) -> Result<Record, LlmError> {
        let text = self.generate_text(payload, endpoint_id).await?;
        let record = extract::extract(&text)?;
        if let Some(schema) = payload.response_schema() {
            record.validate(schema)?;
        }
        Ok(record)
    }

    /// The embedded JSON object deserialized into `T`.
    pub async fn generate_structured<T: DeserializeOwned>(
        &self,
        payload: &GenerateContentRequest,
        endpoint_id: &str,
    ) -> Result<T, LlmError> {
        self.generate_record(payload, endpoint_id).await?.to_typed()
    }

    /// Decode the inline PCM reply into a WAV container.
    ///
    /// The sample rate comes from the `rate=` parameter of the part's MIME type; a reply
    /// without audio or without a rate fails with [`LlmError::MissingAudioMetadata`].
    pub async fn synthesize_speech(
        &self,
        payload: &GenerateContentRequest,
        endpoint_id: &str,
    ) -> Result<AudioContainer, LlmError> {
        let response = self.generate(payload, endpoint_id).await?;
        let blob = response.first_inline_data().ok_or_else(|| {
            LlmError::MissingAudioMetadata("response contains no inline audio data".to_string())
        })?;
        let sample_rate = parse_sample_rate(&blob.mime_type)?.ok_or_else(|| {
            tracing::warn!(mime_type = %blob.mime_type, "audio reply has no sample rate");
            LlmError::MissingAudioMetadata(format!(
                "no sample rate in MIME type `{}`",
                blob.mime_type
            ))
        })?;
        Ok(audio::encode(&blob.data, sample_rate)?)
    }

    async fn generate(
        &self,
        payload: &GenerateContentRequest,
        endpoint_id: &str,
    ) -> Result<GenerateContentResponse, LlmError> {
        let body = self.invoker.invoke(payload, endpoint_id).await?;
        GenerateContentResponse::from_value(&body)
    }
}
