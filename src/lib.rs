//! # genwire
//!
//! Resilient invocation of a generative-language endpoint plus decoding of its replies.
//!
#![deny(unsafe_code)]

//! ## Pieces
//!
//! - [`Invoker`]: sends a [`GenerateContentRequest`] with bounded retry (three attempts,
//!   exponential backoff) and returns the raw body, or a single terminal error.
//! - [`extract()`]: pulls the one JSON object out of a loosely formatted text reply.
//! - [`audio::encode`]: wraps base64 16-bit PCM into a playable WAV container.
//! - [`GenAiClient`]: composes the three for text, structured and speech replies.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use genwire::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GenAiClient::builder().api_key("your-api-key").build()?;
//!
//!     let schema = ResponseSchema::object()
//!         .required_property("debitAccount", ResponseSchema::string())
//!         .required_property("amount", ResponseSchema::number());
//!     let payload = GenerateContentRequest::from_prompt("Paid 500 for rent")
//!         .with_generation_config(GenerationConfig::structured(schema));
//!
//!     let record = client.generate_record(&payload, "gemini-2.5-flash").await?;
//!     println!("{:?}", record.get_str("debitAccount"));
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod builder;
pub mod client;
pub mod error;
pub mod extract;
pub mod invoker;
pub mod observability;
pub mod retry;
pub mod transport;
pub mod types;
pub mod utils;

pub use audio::{AudioContainer, CodecError};
pub use builder::GenAiClientBuilder;
pub use client::GenAiClient;
pub use error::{ErrorCategory, LlmError, Result};
pub use extract::{ExtractionError, Record, extract};
pub use invoker::Invoker;
pub use retry::{RetryExecutor, RetryPolicy};
pub use transport::{HttpTransport, Transport};
pub use types::{
    Content, EndpointConfig, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    Part, ResponseSchema, SchemaType,
};

pub mod prelude {
    pub use crate::audio::{AudioContainer, CodecError};
    pub use crate::error::{ErrorCategory, LlmError, RETRIES_EXHAUSTED_MESSAGE};
    pub use crate::extract::{ExtractionError, Record, extract};
    pub use crate::observability::{TracingConfig, init_tracing};
    pub use crate::retry::RetryPolicy;
    pub use crate::transport::Transport;
    pub use crate::types::*;
    pub use crate::{GenAiClient, GenAiClientBuilder, Invoker};
}
