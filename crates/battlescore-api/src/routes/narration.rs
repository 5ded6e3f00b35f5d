//! Narration director route — free text in, battle direction out.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use battlescore_director::director::NarrationOutcome;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /direct.
#[derive(Debug, Deserialize)]
pub struct DirectRequest {
    /// One line of free-text narration.
    pub narration: String,
}

/// POST /direct
#[instrument(skip(state, request))]
async fn direct(
    State(state): State<AppState>,
    Json(request): Json<DirectRequest>,
) -> Result<Json<NarrationOutcome>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling narration");

    let outcome = state.director.direct_narration(&request.narration).await?;
    Ok(Json(outcome))
}

/// Returns the router for the narration director.
pub fn router() -> Router<AppState> {
    Router::new().route("/direct", post(direct))
}
