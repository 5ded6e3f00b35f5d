//! Routes for the battle lifecycle: start, advance, end.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use battlescore_core::track::Track;
use battlescore_director::state::BattleState;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /start-normal.
#[derive(Debug, Deserialize)]
pub struct StartNormalRequest {
    /// Encounter tag ("minor", "elite", "ambush", ...).
    pub context: String,
}

/// Request body for POST /start-boss.
#[derive(Debug, Deserialize)]
pub struct StartBossRequest {
    /// Encounter tag.
    pub context: String,
    /// Phase count for the fight.
    pub max_phases: u8,
}

/// Request body for POST /advance-phase.
#[derive(Debug, Deserialize, Default)]
pub struct AdvancePhaseRequest {
    /// Explicit phase to jump to; omitted means "next".
    #[serde(default)]
    pub target_phase: Option<u8>,
}

/// Response body for POST /end.
#[derive(Debug, Serialize)]
pub struct EndBattleResponse {
    /// Whether the ended encounter was a boss fight.
    pub was_boss: bool,
    /// The victory sting cued, if an encounter was running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victory_track: Option<Track>,
}

/// POST /start-normal
#[instrument(skip(state, request), fields(context = %request.context))]
async fn start_normal(
    State(state): State<AppState>,
    Json(request): Json<StartNormalRequest>,
) -> Result<Json<BattleState>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling start_normal");

    let battle = state.director.start_normal(&request.context).await?;
    Ok(Json(battle))
}

/// POST /start-boss
#[instrument(skip(state, request), fields(context = %request.context, max_phases = request.max_phases))]
async fn start_boss(
    State(state): State<AppState>,
    Json(request): Json<StartBossRequest>,
) -> Result<Json<BattleState>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling start_boss");

    let battle = state
        .director
        .start_boss(&request.context, request.max_phases)
        .await?;
    Ok(Json(battle))
}

/// POST /advance-phase
#[instrument(skip(state, request), fields(target_phase = ?request.target_phase))]
async fn advance_phase(
    State(state): State<AppState>,
    Json(request): Json<AdvancePhaseRequest>,
) -> Result<Json<BattleState>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling advance_phase");

    let battle = state.director.advance_phase(request.target_phase).await?;
    Ok(Json(battle))
}

/// POST /end
#[instrument(skip(state))]
async fn end_battle(State(state): State<AppState>) -> Result<Json<EndBattleResponse>, ApiError> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling end_battle");

    let outcome = state.director.end_battle().await?;
    Ok(Json(EndBattleResponse {
        was_boss: outcome.was_boss,
        victory_track: outcome.victory_track,
    }))
}

/// Returns the router for the battle lifecycle.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start-normal", post(start_normal))
        .route("/start-boss", post(start_boss))
        .route("/advance-phase", post(advance_phase))
        .route("/end", post(end_battle))
}
