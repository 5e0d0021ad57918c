//! Mock API tests for the HTTPS transport and the client pipeline.
//!
//! Response bodies follow the public `generateContent` response format.

use base64::Engine;
use serde_json::json;
use std::time::Duration;

use genwire::prelude::*;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/v1beta/models/test-model:generateContent";

fn client_for(server: &MockServer) -> GenAiClient {
    GenAiClient::builder()
        .api_key("test-api-key")
        .base_url(format!("{}/v1beta", server.uri()))
        .retry_policy(RetryPolicy::new().with_initial_delay(Duration::from_millis(10)))
        .build()
        .unwrap()
}

fn text_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 7, "totalTokenCount": 11},
        "modelVersion": "test-model-001"
    })
}

fn error_response(code: u16, message: &str, status: &str) -> serde_json::Value {
    json!({"error": {"code": code, "message": message, "status": status}})
}

#[tokio::test]
async fn text_generation_posts_payload_with_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(query_param("key", "test-api-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Hello"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Hi there")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let text = client
        .generate_text(&GenerateContentRequest::from_prompt("Hello"), "test-model")
        .await
        .unwrap();
    assert_eq!(text, "Hi there");
}

#[tokio::test]
async fn raw_body_is_returned_unmodified() {
    let server = MockServer::start().await;
    let body = text_response("verbatim");
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let raw = client
        .invoke(&GenerateContentRequest::from_prompt("x"), "test-model")
        .await
        .unwrap();
    assert_eq!(raw, body);
}

#[tokio::test]
async fn sub_second_timeout_still_allows_fast_replies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("quick")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GenAiClient::builder()
        .api_key("test-api-key")
        .base_url(format!("{}/v1beta", server.uri()))
        .timeout(Duration::from_millis(500))
        .connect_timeout(Duration::from_millis(500))
        .retry_policy(RetryPolicy::new().with_initial_delay(Duration::from_millis(10)))
        .build()
        .unwrap();
    let text = client
        .generate_text(&GenerateContentRequest::from_prompt("x"), "test-model")
        .await
        .unwrap();
    assert_eq!(text, "quick");
}

#[tokio::test]
async fn slow_reply_past_a_sub_second_timeout_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response("late"))
                .set_delay(Duration::from_millis(400)),
        )
        .expect(3)
        .mount(&server)
        .await;

    let client = GenAiClient::builder()
        .api_key("test-api-key")
        .base_url(format!("{}/v1beta", server.uri()))
        .timeout(Duration::from_millis(100))
        .retry_policy(RetryPolicy::new().with_initial_delay(Duration::from_millis(10)))
        .build()
        .unwrap();
    let err = client
        .generate_text(&GenerateContentRequest::from_prompt("x"), "test-model")
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::RetriesExhausted { attempts: 3, .. }));
}

#[tokio::test]
async fn transient_statuses_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(error_response(503, "The model is overloaded.", "UNAVAILABLE")),
        )
        .up_to_n_times(2)
        .with_priority(1)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("finally")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let text = client
        .generate_text(&GenerateContentRequest::from_prompt("x"), "test-model")
        .await
        .unwrap();
    assert_eq!(text, "finally");
}

#[tokio::test]
async fn client_errors_are_retried_and_then_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(error_response(400, "API key not valid.", "INVALID_ARGUMENT")),
        )
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .invoke(&GenerateContentRequest::from_prompt("x"), "test-model")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), RETRIES_EXHAUSTED_MESSAGE);
    match err {
        LlmError::RetriesExhausted { attempts, last_error } => {
            assert_eq!(attempts, 3);
            assert!(last_error.contains("API key not valid."));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_success_body_counts_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .invoke(&GenerateContentRequest::from_prompt("x"), "test-model")
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::RetriesExhausted { .. }));
}

#[tokio::test]
async fn unreachable_endpoint_is_exhausted() {
    // Port 1 is reserved and refuses connections
    let uri = "http://127.0.0.1:1";
    let client = GenAiClient::builder()
        .api_key("test-api-key")
        .base_url(format!("{uri}/v1beta"))
        .retry_policy(RetryPolicy::new().with_initial_delay(Duration::from_millis(5)))
        .build()
        .unwrap();

    let err = client
        .invoke(&GenerateContentRequest::from_prompt("x"), "test-model")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), RETRIES_EXHAUSTED_MESSAGE);
}

#[tokio::test]
async fn structured_reply_is_extracted_and_checked() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_partial_json(json!({
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {"type": "OBJECT"}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(
            "Here you go: {\"debitAccount\":\"Rent\",\"creditAccount\":\"Bank\",\"amount\":500} Thanks!",
        )))
        .mount(&server)
        .await;

    let schema = ResponseSchema::object()
        .required_property("debitAccount", ResponseSchema::string())
        .required_property("creditAccount", ResponseSchema::string())
        .required_property("amount", ResponseSchema::number());
    let payload = GenerateContentRequest::from_prompt("Paid 500 rent from the bank")
        .with_system_instruction("You are a bookkeeping assistant.")
        .with_generation_config(GenerationConfig::structured(schema));

    let client = client_for(&server);
    let record = client.generate_record(&payload, "test-model").await.unwrap();
    assert_eq!(record.get_str("debitAccount"), Some("Rent"));
    assert_eq!(record.get_str("creditAccount"), Some("Bank"));
    assert_eq!(record.get_i64("amount"), Some(500));
}

#[tokio::test]
async fn non_json_reply_is_a_format_error_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response("Sorry, I cannot help.")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .generate_record(&GenerateContentRequest::from_prompt("x"), "test-model")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No valid JSON object found in the response.");
}

#[tokio::test]
async fn speech_reply_is_wrapped_as_wav() {
    let samples: [i16; 4] = [0, 1000, -1000, 32767];
    let pcm: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    let data = base64::engine::general_purpose::STANDARD.encode(pcm);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/test-tts:generateContent"))
        .and(body_partial_json(json!({
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {"voiceConfig": {"prebuiltVoiceConfig": {"voiceName": "Kore"}}}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"role": "model", "parts": [
                {"inlineData": {"mimeType": "audio/L16;codec=pcm;rate=24000", "data": data}}
            ]}}]
        })))
        .mount(&server)
        .await;

    let payload = GenerateContentRequest::from_prompt("Say hello")
        .with_generation_config(GenerationConfig::speech("Kore"));
    let client = client_for(&server);
    let wav = client.synthesize_speech(&payload, "test-tts").await.unwrap();

    let bytes = wav.as_bytes();
    assert_eq!(bytes.len(), 52);
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]), 24000);
    assert_eq!(i16::from_le_bytes([bytes[44], bytes[45]]), 0);
    assert_eq!(i16::from_le_bytes([bytes[50], bytes[51]]), 32767);
    assert_eq!(wav.samples(), samples);
}
