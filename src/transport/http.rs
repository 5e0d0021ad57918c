//! HTTPS transport for the `generateContent` endpoint.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use super::{Transport, classify_http_error};
use crate::error::LlmError;
use crate::types::{EndpointConfig, GenerateContentRequest};
use crate::utils::url::generate_content_url;

/// Sends payloads with `reqwest`, one request per call.
pub struct HttpTransport {
    http_client: reqwest::Client,
    api_key: SecretString,
    config: EndpointConfig,
    headers: HeaderMap,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout())
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Build a transport with its own connection pool configured from `config`.
    pub fn new(api_key: SecretString, config: EndpointConfig) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let http_client = builder.build().map_err(|e| {
            LlmError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
        })?;
        Self::with_http_client(api_key, config, http_client)
    }

    /// Reuse a caller-supplied client. Timeouts in `config` are then the client's concern.
    pub fn with_http_client(
        api_key: SecretString,
        config: EndpointConfig,
        http_client: reqwest::Client,
    ) -> Result<Self, LlmError> {
        let headers = build_headers(&config)?;
        Ok(Self {
            http_client,
            api_key,
            config,
            headers,
        })
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }
}

fn build_headers(config: &EndpointConfig) -> Result<HeaderMap, LlmError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| LlmError::ConfigurationError(format!("Invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| LlmError::ConfigurationError(format!("Invalid header value: {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        payload: &GenerateContentRequest,
        endpoint_id: &str,
    ) -> Result<Value, LlmError> {
        let url = generate_content_url(
            &self.config.base_url,
            endpoint_id,
            self.api_key.expose_secret(),
        );

        let resp = self
            .http_client
            .post(url)
            .headers(self.headers.clone())
            .json(payload)
            .send()
            .await
            .map_err(LlmError::from)?;

        let status = resp.status();
        if !status.is_success() {
            let headers = resp.headers().clone();
            let text = resp.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "endpoint returned non-success status");
            return Err(classify_http_error(status.as_u16(), &text, &headers));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| LlmError::HttpError(format!("failed to read response body: {e}")))?;
        // An undecodable 2xx body is treated like any other delivery fault
        serde_json::from_str(&text)
            .map_err(|e| LlmError::HttpError(format!("failed to decode response body: {e}")))
    }
}
