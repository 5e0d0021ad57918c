//! Core error types.

use thiserror::Error;

use crate::audio::CodecError;
use crate::extract::ExtractionError;

/// Message surfaced once every delivery attempt has failed.
pub const RETRIES_EXHAUSTED_MESSAGE: &str =
    "Failed to get a response from the AI after multiple retries.";

/// Coarse error category, used for retry decisions and presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport-level failure (connect, timeout, DNS, body read)
    Network,
    /// 5xx responses
    Server,
    /// 4xx responses other than auth and rate limiting
    Client,
    /// 401/403 responses
    Authentication,
    /// 429 responses
    RateLimit,
    /// Delivery attempts exhausted
    Exhausted,
    /// Response body or text could not be interpreted
    Parsing,
    /// Audio payload could not be turned into a container
    Audio,
    /// Caller supplied an unusable payload or argument
    Validation,
    /// Client could not be built from its configuration
    Configuration,
    /// Anything else
    Internal,
}

/// Error type for every fallible operation in this crate.
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    /// Transport fault: the request never produced an HTTP status.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The endpoint answered with a non-success status.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// All delivery attempts failed. The last transient cause is kept for diagnostics
    /// only; the display text is fixed.
    #[error("{}", RETRIES_EXHAUSTED_MESSAGE)]
    RetriesExhausted { attempts: u32, last_error: String },

    /// The response text did not contain a usable JSON object.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The inline audio payload could not be wrapped into a container.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The audio reply did not declare a sample rate.
    #[error("Missing audio metadata: {0}")]
    MissingAudioMetadata(String),

    /// A field the caller required is absent.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A field is present but does not match the declared schema.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The response body did not have the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl LlmError {
    /// Shorthand for an `ApiError` without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// `ApiError` carrying a structured diagnostic payload.
    pub fn api_error_with_details(
        code: u16,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    /// HTTP status code, when the error came from a response.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) => ErrorCategory::Network,
            Self::ApiError { code, .. } => match *code {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            Self::RetriesExhausted { .. } => ErrorCategory::Exhausted,
            Self::Extraction(_)
            | Self::ParseError(_)
            | Self::MissingField(_)
            | Self::SchemaMismatch(_) => ErrorCategory::Parsing,
            Self::Codec(_) | Self::MissingAudioMetadata(_) => ErrorCategory::Audio,
            Self::InvalidInput(_) => ErrorCategory::Validation,
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// Transient delivery failures: any transport fault or any non-success status.
    ///
    /// The status class does not matter; a 400 is retried exactly like a 503.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::HttpError(_) | Self::ApiError { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LlmError>;
