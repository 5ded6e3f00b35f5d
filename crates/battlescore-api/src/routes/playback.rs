//! Manual playback route — explicit transition and intensity control.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use battlescore_director::volume::{Intensity, TransitionKind};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /play.
#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    /// Encounter tag used for selection when no URI is given.
    pub context: String,
    /// Explicit track to play, skipping selection.
    #[serde(default)]
    pub track_uri: Option<String>,
    /// Transition style ("cut", "fade_in", "fade_out", "crossfade",
    /// "build_up").
    pub transition: TransitionKind,
    /// Sustain intensity ("low".."extreme", or "escalating").
    pub intensity: Intensity,
}

/// Response body for POST /play.
#[derive(Debug, Serialize)]
pub struct PlayResponse {
    /// The track that playback was issued for.
    pub track_uri: String,
}

/// POST /play
#[instrument(skip(state, request), fields(context = %request.context))]
async fn play(
    State(state): State<AppState>,
    Json(request): Json<PlayRequest>,
) -> Result<Json<PlayResponse>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling manual play");

    let track_uri = state
        .director
        .play_manual(
            &request.context,
            request.track_uri,
            request.transition,
            request.intensity,
        )
        .await?;
    Ok(Json(PlayResponse { track_uri }))
}

/// Returns the router for manual playback.
pub fn router() -> Router<AppState> {
    Router::new().route("/play", post(play))
}
