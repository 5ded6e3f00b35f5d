//! External provider capabilities.
//!
//! The real music-catalog and text-to-speech integrations live behind
//! these traits; the director never talks to the network directly.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ProviderError;
use crate::track::{PlaybackState, Track};

/// Style payload sent alongside a synthesis request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleParams {
    /// Voice stability, 0.0–1.0.
    pub stability: f32,
    /// Similarity boost, 0.0–1.0.
    pub similarity_boost: f32,
    /// Merged style descriptor: the character's base descriptor plus the
    /// requested emotion.
    pub style: String,
}

/// Music-catalog search and playback capability.
#[async_trait]
pub trait AudioProvider: Send + Sync {
    /// Search the catalog, returning at most `limit` tracks, best first.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Track>, ProviderError>;

    /// Start playback of `uri` at `start_position_ms`.
    async fn play(&self, uri: &str, start_position_ms: u64) -> Result<(), ProviderError>;

    /// Set the playback volume as a percentage, 0–100.
    async fn set_volume(&self, percent: u8) -> Result<(), ProviderError>;

    /// Current playback state.
    async fn playback_state(&self) -> Result<PlaybackState, ProviderError>;

    /// Exchange the refresh credential for a fresh access credential.
    async fn refresh_credential(&self) -> Result<(), ProviderError>;
}

/// Text-to-speech capability.
#[async_trait]
pub trait TtsProvider: Send + Sync {
    /// Synthesize `text` with the given voice and style, returning encoded
    /// audio bytes.
    async fn synthesize(
        &self,
        voice_id: &str,
        text: &str,
        style: &StyleParams,
    ) -> Result<Vec<u8>, ProviderError>;
}
