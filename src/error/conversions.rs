//! Conversions from third-party error types.

use super::types::LlmError;

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::api_error(status.as_u16(), err.to_string());
        }
        if err.is_timeout() {
            return Self::HttpError(format!("request timed out: {err}"));
        }
        if err.is_connect() {
            return Self::HttpError(format!("connection failed: {err}"));
        }
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(format!("JSON error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_json_errors_become_parse_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let llm: LlmError = err.into();
        assert!(matches!(llm, LlmError::ParseError(ref m) if m.starts_with("JSON error:")));
    }
}
