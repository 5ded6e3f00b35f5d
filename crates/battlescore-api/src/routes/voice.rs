//! Character voice generation route.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::post};
use battlescore_voice::emotion;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /generate.
#[derive(Debug, Deserialize)]
pub struct GenerateVoiceRequest {
    /// Character name; must resolve against the voice registry.
    pub character: String,
    /// The text to speak.
    pub text: String,
    /// Emotion descriptor; defaults to "neutral".
    #[serde(default)]
    pub emotion: Option<String>,
}

/// POST /generate — returns binary audio.
#[instrument(skip(state, request), fields(character = %request.character))]
async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateVoiceRequest>,
) -> Result<Response, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling voice generation");

    let synthesis = emotion::build_synthesis_request(
        &state.voices,
        &request.character,
        &request.text,
        request.emotion.as_deref(),
    )?;
    let audio = state
        .tts
        .synthesize(&synthesis.voice_id, &synthesis.text, &synthesis.style)
        .await
        .map_err(ApiError::from)?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response())
}

/// Returns the router for voice generation.
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate))
}
