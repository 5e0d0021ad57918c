//! URL construction helpers

/// Join a base URL and a path with exactly one slash between them.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// `{base}/models/{endpoint_id}:generateContent?key={api_key}` with the key percent-encoded.
pub fn generate_content_url(base_url: &str, endpoint_id: &str, api_key: &str) -> String {
    let url = join_url(base_url, &format!("models/{endpoint_id}:generateContent"));
    if api_key.is_empty() {
        url
    } else {
        format!("{url}?key={}", urlencoding::encode(api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_handles_slashes() {
        assert_eq!(join_url("http://h/v1/", "/models"), "http://h/v1/models");
        assert_eq!(join_url("http://h/v1", "models"), "http://h/v1/models");
    }

    #[test]
    fn generate_content_url_encodes_key() {
        assert_eq!(
            generate_content_url("https://x/v1beta", "m-1", "a b&c"),
            "https://x/v1beta/models/m-1:generateContent?key=a%20b%26c"
        );
        assert_eq!(
            generate_content_url("https://x/v1beta/", "m-1", ""),
            "https://x/v1beta/models/m-1:generateContent"
        );
    }
}
