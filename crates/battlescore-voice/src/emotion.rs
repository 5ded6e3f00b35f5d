//! Emotion → synthesis style mapping.

use battlescore_core::error::DirectorError;
use battlescore_core::provider::StyleParams;

use crate::registry::VoiceRegistry;

/// Emotion used when a request does not name one.
pub const DEFAULT_EMOTION: &str = "neutral";

// Voice settings carried over from the synthesis provider's defaults.
const STABILITY: f32 = 0.6;
const SIMILARITY_BOOST: f32 = 0.85;

/// A fully resolved synthesis request, ready for the TTS provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    /// Provider voice identifier.
    pub voice_id: String,
    /// The text to speak, unmodified.
    pub text: String,
    /// Style payload with the emotion merged in.
    pub style: StyleParams,
}

/// Resolve a character and emotion into a synthesis request.
///
/// # Errors
///
/// `UnknownCharacter` when the character has no profile (no silent
/// default-voice fallback); `InvalidState` when the text is blank.
pub fn build_synthesis_request(
    registry: &VoiceRegistry,
    character: &str,
    text: &str,
    emotion: Option<&str>,
) -> Result<SynthesisRequest, DirectorError> {
    if text.trim().is_empty() {
        return Err(DirectorError::InvalidState(
            "voice text must not be empty".to_owned(),
        ));
    }
    let profile = registry
        .resolve(character)
        .ok_or_else(|| DirectorError::UnknownCharacter(character.to_owned()))?;

    let emotion = emotion.unwrap_or(DEFAULT_EMOTION);
    let style = if profile.base_style.is_empty() {
        emotion.to_owned()
    } else {
        format!("{}, {emotion}", profile.base_style)
    };

    Ok(SynthesisRequest {
        voice_id: profile.voice_id.clone(),
        text: text.to_owned(),
        style: StyleParams {
            stability: STABILITY,
            similarity_boost: SIMILARITY_BOOST,
            style,
        },
    })
}
