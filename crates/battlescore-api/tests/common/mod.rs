//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use battlescore_core::clock::Clock;
use battlescore_core::provider::{AudioProvider, TtsProvider};
use battlescore_core::rng::DeterministicRng;
use battlescore_director::director::BattleDirector;
use battlescore_test_support::{FixedClock, MockRng, RecordingAudioProvider, RecordingTtsProvider, sample_tracks};
use battlescore_voice::registry::VoiceRegistry;
use http_body_util::BodyExt;
use tower::ServiceExt;

use battlescore_api::routes;
use battlescore_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 3, 1, 20, 0, 0).unwrap(),
    ))
}

/// Build the full app router over the given providers with a
/// deterministic clock and RNG. Uses the same route structure as
/// `main.rs`.
pub fn build_test_app_with(audio: Arc<dyn AudioProvider>, tts: Arc<dyn TtsProvider>) -> Router {
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
    let director = Arc::new(BattleDirector::new(audio, fixed_clock(), rng, 4));
    let app_state = AppState::new(director, Arc::new(VoiceRegistry::builtin()), tts);
    routes::app(app_state)
}

/// Build the full app router over a recording audio provider seeded with
/// five tracks, returning the provider for call assertions.
pub fn build_test_app() -> (Router, Arc<RecordingAudioProvider>, Arc<RecordingTtsProvider>) {
    let audio = Arc::new(RecordingAudioProvider::new().with_tracks(sample_tracks(5)));
    let tts = Arc::new(RecordingTtsProvider::new());
    let app = build_test_app_with(
        Arc::clone(&audio) as Arc<dyn AudioProvider>,
        Arc::clone(&tts) as Arc<dyn TtsProvider>,
    );
    (app, audio, tts)
}

/// Send a POST request with a JSON body and return the status and JSON
/// response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    // Rejections produced by axum itself (e.g. 422 for missing fields)
    // carry plain-text bodies; fall back to Null for those.
    let json: serde_json::Value =
        serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

/// Send a POST request and return the status and raw body bytes.
pub async fn post_raw(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, Option<String>, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, content_type, body_bytes.to_vec())
}

/// Send a GET request and return the status and JSON response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
