//! Integration tests for the manual playback route.

mod common;

use axum::http::StatusCode;
use battlescore_test_support::AudioCall;

#[tokio::test]
async fn test_play_with_explicit_uri_skips_selection() {
    let (app, audio, _tts) = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/playback/play",
        &serde_json::json!({
            "context": "minor",
            "track_uri": "provider:track:42",
            "transition": "cut",
            "intensity": "low",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["track_uri"], "provider:track:42");
    assert_eq!(audio.played(), vec!["provider:track:42".to_owned()]);
    assert!(
        audio
            .calls()
            .iter()
            .all(|c| !matches!(c, AudioCall::Search { .. }))
    );
}

#[tokio::test(start_paused = true)]
async fn test_play_without_uri_selects_for_context() {
    let (app, audio, _tts) = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/playback/play",
        &serde_json::json!({
            "context": "elite",
            "transition": "fade_in",
            "intensity": "high",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["track_uri"], "provider:track:0");
    // FadeIn ducks low, then restores to the High sustain.
    assert_eq!(audio.volume_steps(), vec![20, 80]);
}

#[tokio::test]
async fn test_play_with_unknown_transition_returns_422() {
    let (app, _audio, _tts) = common::build_test_app();

    let (status, _json) = common::post_json(
        app,
        "/api/v1/playback/play",
        &serde_json::json!({
            "context": "minor",
            "transition": "wobble",
            "intensity": "low",
        }),
    )
    .await;

    // Axum returns 422 for deserialization failures.
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
