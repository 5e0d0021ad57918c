//! Builder for [`GenAiClient`].

use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;

use crate::client::GenAiClient;
use crate::error::LlmError;
use crate::invoker::Invoker;
use crate::observability::{TracingConfig, init_tracing};
use crate::retry::RetryPolicy;
use crate::transport::{HttpTransport, Transport};
use crate::types::EndpointConfig;

/// Fluent configuration for a [`GenAiClient`].
///
/// # Example
/// ```rust,ignore
/// let client = GenAiClient::builder()
///     .api_key("your-api-key")
///     .timeout(Duration::from_secs(20))
///     .build()?;
///
/// let text = client
///     .generate_text(&GenerateContentRequest::from_prompt("Hello"), "gemini-2.5-flash")
///     .await?;
/// ```
#[derive(Default)]
pub struct GenAiClientBuilder {
    api_key: Option<SecretString>,
    config: EndpointConfig,
    retry_policy: Option<RetryPolicy>,
    http_client: Option<reqwest::Client>,
    transport: Option<Arc<dyn Transport>>,
    tracing_config: Option<TracingConfig>,
}

impl GenAiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    /// Replace the whole endpoint configuration
    pub fn endpoint_config(mut self, config: EndpointConfig) -> Self {
        self.config = config;
        self
    }

    /// Per-attempt request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_connect_timeout(timeout);
        self
    }

    /// Add a header sent with every request
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config = self.config.with_header(name, value);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.with_user_agent(user_agent);
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Use a preconfigured `reqwest` client
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Bypass HTTP entirely; the API key and endpoint settings are then ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    // === Tracing Configuration ===

    pub fn tracing(mut self, config: TracingConfig) -> Self {
        self.tracing_config = Some(config);
        self
    }

    pub fn debug_tracing(self) -> Self {
        self.tracing(TracingConfig::development())
    }

    pub fn json_tracing(self) -> Self {
        self.tracing(TracingConfig::json_production())
    }

    /// Build the client
    ///
    /// The subscriber from [`tracing`](Self::tracing) is installed only once the transport
    /// exists, so a rejected configuration leaves global logging untouched.
    pub fn build(self) -> Result<GenAiClient, LlmError> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let api_key = self.api_key.ok_or_else(|| {
                    LlmError::ConfigurationError("API key is required".to_string())
                })?;
                if self.config.base_url.trim().is_empty() {
                    return Err(LlmError::ConfigurationError(
                        "base URL must not be empty".to_string(),
                    ));
                }
                let http = match self.http_client {
                    Some(client) => HttpTransport::with_http_client(api_key, self.config, client)?,
                    None => HttpTransport::new(api_key, self.config)?,
                };
                Arc::new(http)
            }
        };

        let tracing_guard = match &self.tracing_config {
            Some(config) => init_tracing(config.clone())?,
            None => None,
        };

        let invoker = Invoker::with_retry_policy(transport, self.retry_policy.unwrap_or_default());
        let mut client = GenAiClient::new(invoker);
        client.set_tracing_guard(tracing_guard);
        Ok(client)
    }
}
