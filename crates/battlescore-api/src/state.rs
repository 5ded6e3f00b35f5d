//! Shared application state.

use std::sync::Arc;

use battlescore_core::provider::TtsProvider;
use battlescore_director::director::BattleDirector;
use battlescore_voice::registry::VoiceRegistry;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The battle director (owns the single battle state).
    pub director: Arc<BattleDirector>,
    /// Character voice registry.
    pub voices: Arc<VoiceRegistry>,
    /// Text-to-speech capability.
    pub tts: Arc<dyn TtsProvider>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        director: Arc<BattleDirector>,
        voices: Arc<VoiceRegistry>,
        tts: Arc<dyn TtsProvider>,
    ) -> Self {
        Self {
            director,
            voices,
            tts,
        }
    }
}
