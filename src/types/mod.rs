//! Wire and configuration types

pub mod config;
pub mod request;
pub mod response;
pub mod schema;

pub use config::{DEFAULT_BASE_URL, EndpointConfig};
pub use request::{
    Blob, Content, GenerateContentRequest, GenerationConfig, JSON_MIME_TYPE, Part,
    PrebuiltVoiceConfig, SpeechConfig, VoiceConfig,
};
pub use response::{Candidate, GenerateContentResponse, UsageMetadata};
pub use schema::{ResponseSchema, SchemaType};
