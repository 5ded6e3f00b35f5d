//! Simulated providers for standalone runs.
//!
//! The real music-catalog and text-to-speech clients are wired in behind
//! the core provider traits at deployment time. These simulations
//! fabricate deterministic tracks from the query and keep playback state
//! in memory, so the server runs end to end with no credentials.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use battlescore_core::error::ProviderError;
use battlescore_core::provider::{AudioProvider, StyleParams, TtsProvider};
use battlescore_core::track::{PlaybackState, Track};
use tracing::debug;

const MAX_RESULTS: usize = 10;

#[derive(Debug, Default)]
struct SimPlayback {
    volume: u8,
    current_uri: Option<String>,
    is_playing: bool,
}

/// In-process audio provider. Searches fabricate a stable result list
/// from the query text; playback and volume are tracked in memory.
#[derive(Debug, Default)]
pub struct SimulatedAudioProvider {
    playback: Mutex<SimPlayback>,
}

impl SimulatedAudioProvider {
    /// Create an idle simulated provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimPlayback> {
        self.playback.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AudioProvider for SimulatedAudioProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Track>, ProviderError> {
        let slug = query.replace(' ', "-");
        Ok((0..limit.min(MAX_RESULTS))
            .map(|i| Track {
                uri: format!("sim:track:{slug}:{i}"),
                title: format!("{query} #{}", i + 1),
                artists: vec!["Simulated Orchestra".to_owned()],
                duration_ms: 150_000 + (i as u64) * 7_000,
            })
            .collect())
    }

    async fn play(&self, uri: &str, start_position_ms: u64) -> Result<(), ProviderError> {
        debug!(uri, start_position_ms, "simulated playback start");
        let mut playback = self.lock();
        playback.current_uri = Some(uri.to_owned());
        playback.is_playing = true;
        Ok(())
    }

    async fn set_volume(&self, percent: u8) -> Result<(), ProviderError> {
        self.lock().volume = percent.min(100);
        Ok(())
    }

    async fn playback_state(&self) -> Result<PlaybackState, ProviderError> {
        let playback = self.lock();
        Ok(PlaybackState {
            is_playing: playback.is_playing,
            current_uri: playback.current_uri.clone(),
            progress_ms: 0,
        })
    }

    async fn refresh_credential(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// In-process TTS provider returning a placeholder payload.
#[derive(Debug, Default)]
pub struct SimulatedTtsProvider;

impl SimulatedTtsProvider {
    /// Create the simulated TTS provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TtsProvider for SimulatedTtsProvider {
    async fn synthesize(
        &self,
        voice_id: &str,
        text: &str,
        style: &StyleParams,
    ) -> Result<Vec<u8>, ProviderError> {
        debug!(voice_id, style = %style.style, "simulated synthesis");
        Ok(format!("SIM-AUDIO voice={voice_id} len={}", text.len()).into_bytes())
    }
}
