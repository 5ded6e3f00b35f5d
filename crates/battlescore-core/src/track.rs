//! Track and playback-state value types.

use serde::{Deserialize, Serialize};

/// One playable track from the audio provider's catalog.
///
/// Obtained transiently from a search; never persisted beyond the
/// current encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Opaque provider identifier, e.g. `spotify:track:...`.
    pub uri: String,
    /// Display title.
    pub title: String,
    /// Contributing artists, in provider order.
    pub artists: Vec<String>,
    /// Track length in milliseconds.
    pub duration_ms: u64,
}

/// Snapshot of the provider's playback state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Whether anything is currently playing.
    pub is_playing: bool,
    /// URI of the current track, if any.
    pub current_uri: Option<String>,
    /// Playback position within the current track.
    pub progress_ms: u64,
}
