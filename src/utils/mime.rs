//! MIME type parameter utilities

use regex::Regex;
use std::sync::LazyLock;

use crate::error::LlmError;

static RATE_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"rate=(\d+)"));

/// Read the `rate=<digits>` parameter from a MIME type such as `audio/L16;codec=pcm;rate=24000`.
///
/// The first `rate=` followed by digits wins; matching is case-sensitive. Returns `Ok(None)`
/// when the parameter is absent or does not fit a `u32`.
pub fn parse_sample_rate(mime_type: &str) -> Result<Option<u32>, LlmError> {
    let pattern = RATE_PATTERN.as_ref().map_err(|e| {
        LlmError::InternalError(format!("sample rate pattern failed to compile: {e}"))
    })?;
    Ok(pattern
        .captures(mime_type)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(mime_type: &str) -> Option<u32> {
        parse_sample_rate(mime_type).unwrap()
    }

    #[test]
    fn reads_rate_parameter() {
        assert_eq!(rate("audio/L16;codec=pcm;rate=24000"), Some(24000));
        assert_eq!(rate("audio/L16; rate=16000"), Some(16000));
        assert_eq!(rate("rate=8000"), Some(8000));
    }

    #[test]
    fn any_rate_digits_substring_counts() {
        assert_eq!(rate("audio/L16;samplerate=22050"), Some(22050));
        assert_eq!(rate("audio/L16;rate=abc;x-rate=11025"), Some(11025));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(rate("audio/pcm;RATE=8000"), None);
        assert_eq!(rate("audio/pcm;Rate=8000"), None);
    }

    #[test]
    fn missing_or_overflowing_rate() {
        assert_eq!(rate("audio/L16;codec=pcm"), None);
        assert_eq!(rate("audio/L16;rate="), None);
        assert_eq!(rate("audio/L16;rate=99999999999"), None);
        assert_eq!(rate(""), None);
    }
}
