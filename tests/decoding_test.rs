//! Extraction and audio container behavior through the public API.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;

use genwire::audio::{self, WAV_HEADER_LEN};
use genwire::prelude::*;

#[test]
fn object_surrounded_by_plain_prose_is_returned_unchanged() {
    let object = json!({
        "summary": "Spending is stable",
        "score": 7.5,
        "tips": ["cook at home", "review subscriptions"],
        "breakdown": {"food": 120, "rent": 900}
    });
    let serialized = object.to_string();

    for wrapper in [
        ("", ""),
        ("Sure! ", " Let me know if you need more."),
        ("```json\n", "\n```"),
        ("\n\n  Result:\n", "\n\n"),
    ] {
        let text = format!("{}{}{}", wrapper.0, serialized, wrapper.1);
        let record = extract(&text).unwrap();
        assert_eq!(record.into_value(), object, "wrapper: {wrapper:?}");
    }
}

#[test]
fn extraction_failures_have_distinct_messages() {
    let none = extract("I could not produce an answer.").unwrap_err();
    assert_eq!(none.to_string(), "No valid JSON object found in the response.");

    let invalid = extract("{summary: unquoted}").unwrap_err();
    assert!(
        invalid
            .to_string()
            .starts_with("The AI response was not in the expected JSON format.")
    );
    assert_ne!(none.to_string(), invalid.to_string());

    let as_llm: LlmError = invalid.into();
    assert_eq!(as_llm.category(), ErrorCategory::Parsing);
}

#[test]
fn pcm_round_trips_through_the_container() {
    let samples: Vec<i16> = (0..480).map(|i| ((i * 137) % 65536 - 32768) as i16).collect();
    let pcm: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

    for rate in [8000u32, 16000, 24000, 44100, 48000] {
        let wav = audio::encode(&STANDARD.encode(&pcm), rate).unwrap();
        assert_eq!(wav.len(), WAV_HEADER_LEN + pcm.len());
        assert_eq!(wav.sample_rate(), rate);
        assert_eq!(&wav.as_bytes()[WAV_HEADER_LEN..], pcm.as_slice());
        assert_eq!(wav.samples(), samples);
        assert_eq!(wav.mime_type(), "audio/wav");
    }
}

#[test]
fn codec_rejections_convert_to_audio_errors() {
    let err: LlmError = audio::encode("AAAA AAA", 24000).unwrap_err().into();
    assert_eq!(err.category(), ErrorCategory::Audio);
    assert!(!err.is_retryable());
}
