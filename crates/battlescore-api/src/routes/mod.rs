//! HTTP routes.

pub mod battle;
pub mod health;
pub mod narration;
pub mod playback;
pub mod voice;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router. Shared by `main` and the
/// integration tests.
pub fn app(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    Router::new()
        .merge(health::router())
        .nest("/api/v1/battle", battle::router())
        .nest("/api/v1/playback", playback::router())
        .nest("/api/v1/narration", narration::router())
        .nest("/api/v1/voice", voice::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
