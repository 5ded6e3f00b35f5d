//! Battlescore API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use battlescore_core::clock::{Clock, SystemClock};
use battlescore_core::provider::{AudioProvider, TtsProvider};
use battlescore_core::rng::{DeterministicRng, ThreadRngAdapter};
use battlescore_director::director::BattleDirector;
use battlescore_voice::registry::VoiceRegistry;
use tracing_subscriber::EnvFilter;

use battlescore_api::{jobs, routes, sim, state};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Battlescore audio director");

    // Read configuration from environment.
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| format!("PORT must be a valid u16: {e}"))?;
    let max_boss_phases: u8 = std::env::var("MAX_BOSS_PHASES")
        .unwrap_or_else(|_| "4".to_string())
        .parse()
        .map_err(|e| format!("MAX_BOSS_PHASES must be a valid u8: {e}"))?;
    let refresh_minutes: u64 = std::env::var("CREDENTIAL_REFRESH_MINUTES")
        .unwrap_or_else(|_| "50".to_string())
        .parse()
        .map_err(|e| format!("CREDENTIAL_REFRESH_MINUTES must be a valid u64: {e}"))?;

    let voices = match std::env::var("VOICE_REGISTRY") {
        Ok(path) => VoiceRegistry::with_overrides(Path::new(&path))
            .map_err(|e| format!("failed to load voice registry: {e}"))?,
        Err(_) => VoiceRegistry::builtin(),
    };

    // The real catalog/TTS clients plug in behind these traits; the
    // simulated providers keep the server runnable with no credentials.
    let audio: Arc<dyn AudioProvider> = Arc::new(sim::SimulatedAudioProvider::new());
    let tts: Arc<dyn TtsProvider> = Arc::new(sim::SimulatedTtsProvider::new());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(ThreadRngAdapter));
    let director = Arc::new(BattleDirector::new(
        Arc::clone(&audio),
        clock,
        rng,
        max_boss_phases,
    ));

    jobs::spawn_credential_refresh(
        Arc::clone(&audio),
        Duration::from_secs(refresh_minutes * 60),
    );

    // Build router.
    let app_state = state::AppState::new(director, Arc::new(voices), tts);
    let app = routes::app(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
