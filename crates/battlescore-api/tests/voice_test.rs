//! Integration tests for the voice generation route.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use battlescore_core::provider::{AudioProvider, TtsProvider};
use battlescore_test_support::{FailingTtsProvider, RecordingAudioProvider, sample_tracks};

#[tokio::test]
async fn test_generate_returns_audio_bytes() {
    let (app, _audio, tts) = common::build_test_app();

    let (status, content_type, body) = common::post_raw(
        app,
        "/api/v1/voice/generate",
        &serde_json::json!({
            "character": "Kael",
            "text": "Hold the line!",
            "emotion": "angry",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("audio/mpeg"));
    assert!(!body.is_empty());

    // The emotion was merged into the style payload.
    let requests = tts.requests();
    assert_eq!(requests.len(), 1);
    let (voice_id, text, style) = &requests[0];
    assert_eq!(voice_id, "TxGEqnHWrfWFTfGW9XjX");
    assert_eq!(text, "Hold the line!");
    assert_eq!(style.style, "gravelly, commanding, angry");
}

#[tokio::test]
async fn test_generate_defaults_emotion_to_neutral() {
    let (app, _audio, tts) = common::build_test_app();

    let (status, _content_type, _body) = common::post_raw(
        app,
        "/api/v1/voice/generate",
        &serde_json::json!({ "character": "narrator", "text": "Night falls." }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(tts.requests()[0].2.style, "calm, measured, neutral");
}

#[tokio::test]
async fn test_unknown_character_returns_400() {
    let (app, _audio, _tts) = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/voice/generate",
        &serde_json::json!({ "character": "Unknown", "text": "hi" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "unknown_character");
}

#[tokio::test]
async fn test_blank_text_returns_400() {
    let (app, _audio, _tts) = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/voice/generate",
        &serde_json::json!({ "character": "narrator", "text": "   " }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_state");
}

#[tokio::test]
async fn test_failing_tts_provider_returns_502() {
    let audio = Arc::new(RecordingAudioProvider::new().with_tracks(sample_tracks(1)));
    let app = common::build_test_app_with(
        audio as Arc<dyn AudioProvider>,
        Arc::new(FailingTtsProvider) as Arc<dyn TtsProvider>,
    );

    let (status, json) = common::post_json(
        app,
        "/api/v1/voice/generate",
        &serde_json::json!({ "character": "narrator", "text": "Night falls." }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "provider_unavailable");
}
