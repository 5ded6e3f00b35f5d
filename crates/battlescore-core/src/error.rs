//! Domain error types.

use thiserror::Error;

/// Failures reported by external audio/TTS providers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider rejected the current credential. Recoverable locally
    /// via one refresh-and-retry cycle.
    #[error("provider credential expired")]
    AuthExpired,

    /// No active playback device. A routine idle condition, not a defect.
    #[error("no active playback device")]
    DeviceUnavailable,

    /// The provider is unreachable or answered with a server error.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The bounded wait on a provider call elapsed.
    #[error("provider call timed out")]
    Timeout,

    /// Any other provider failure.
    #[error("provider error: {0}")]
    Other(String),
}

/// Top-level error type for director operations.
#[derive(Debug, Error)]
pub enum DirectorError {
    /// The operation is invalid for the current battle state or input.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The character has no registered voice profile.
    #[error("unknown character: {0}")]
    UnknownCharacter(String),

    /// A track search came back empty.
    #[error("no candidate track for query: {query}")]
    NoCandidateTrack {
        /// The query that produced no candidates.
        query: String,
    },

    /// A provider call failed after local recovery was exhausted.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
