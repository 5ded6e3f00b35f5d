//! Integration tests for the narration director route.

mod common;

use axum::http::StatusCode;

#[tokio::test(start_paused = true)]
async fn test_boss_onset_narration_starts_a_boss_fight() {
    let (app, _audio, _tts) = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/narration/direct",
        &serde_json::json!({ "narration": "The boss roars and the fight begins!" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["handled_event"], "start_boss");
    assert_eq!(json["battle_state"]["kind"], "boss");
    assert_eq!(json["battle_state"]["phase"], 1);
    assert_eq!(json["battle_state"]["max_phases"], 3);
}

#[tokio::test(start_paused = true)]
async fn test_final_phase_narration_jumps_to_max() {
    let (app, _audio, _tts) = common::build_test_app();

    let (status, _json) = common::post_json(
        app.clone(),
        "/api/v1/battle/start-boss",
        &serde_json::json!({ "context": "boss", "max_phases": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = common::post_json(
        app,
        "/api/v1/narration/direct",
        &serde_json::json!({ "narration": "The boss enters final phase" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["handled_event"], "boss_phase");
    assert_eq!(json["battle_state"]["phase"], 3);
}

#[tokio::test(start_paused = true)]
async fn test_ambush_narration_starts_ambush_encounter() {
    let (app, _audio, _tts) = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/narration/direct",
        &serde_json::json!({ "narration": "Enemies appear, it's an ambush!" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["handled_event"], "start_normal");
    assert_eq!(json["battle_state"]["context"], "ambush");
}

#[tokio::test(start_paused = true)]
async fn test_victory_narration_ends_the_battle() {
    let (app, _audio, _tts) = common::build_test_app();

    common::post_json(
        app.clone(),
        "/api/v1/battle/start-normal",
        &serde_json::json!({ "context": "minor" }),
    )
    .await;

    let (status, json) = common::post_json(
        app,
        "/api/v1/narration/direct",
        &serde_json::json!({ "narration": "They retreat, victory is ours" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["handled_event"], "end_battle");
    assert_eq!(json["battle_state"]["active"], false);
    assert!(json["victory_track"]["uri"].is_string());
}

#[tokio::test]
async fn test_victory_narration_while_idle_is_handled() {
    let (app, audio, _tts) = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/narration/direct",
        &serde_json::json!({ "narration": "Victory!" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["handled_event"], "end_battle");
    assert!(json.get("victory_track").is_none());
    assert!(audio.calls().is_empty());
}

#[tokio::test]
async fn test_phase_narration_without_boss_returns_400() {
    let (app, _audio, _tts) = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/narration/direct",
        &serde_json::json!({ "narration": "The boss enters phase 2" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_state");
}

#[tokio::test]
async fn test_unrelated_narration_is_a_noop() {
    let (app, audio, _tts) = common::build_test_app();

    let (status, json) = common::post_json(
        app,
        "/api/v1/narration/direct",
        &serde_json::json!({ "narration": "The party shares a quiet meal" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["handled_event"], "none");
    assert!(json.get("battle_state").is_none());
    assert!(audio.calls().is_empty());
}
