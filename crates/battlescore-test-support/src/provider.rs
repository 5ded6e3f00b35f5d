//! Provider mocks — scripted `AudioProvider`/`TtsProvider` implementations.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use battlescore_core::error::ProviderError;
use battlescore_core::provider::{AudioProvider, StyleParams, TtsProvider};
use battlescore_core::track::{PlaybackState, Track};

/// One recorded call against a [`RecordingAudioProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCall {
    /// A catalog search.
    Search {
        /// The query string.
        query: String,
        /// The requested result cap.
        limit: usize,
    },
    /// A playback start.
    Play {
        /// The track URI.
        uri: String,
        /// The start offset.
        start_position_ms: u64,
    },
    /// A volume step.
    SetVolume {
        /// The target volume percent.
        percent: u8,
    },
    /// A playback-state query.
    PlaybackState,
    /// A credential refresh.
    RefreshCredential,
}

/// Builds `count` distinct tracks for seeding search results.
#[must_use]
pub fn sample_tracks(count: usize) -> Vec<Track> {
    (0..count)
        .map(|i| Track {
            uri: format!("provider:track:{i}"),
            title: format!("Track {i}"),
            artists: vec![format!("Artist {i}")],
            duration_ms: 180_000 + (i as u64) * 1_000,
        })
        .collect()
}

/// An audio provider that records every call. Search returns a configured
/// track list; `play` consumes scripted failures in order before
/// succeeding; `set_volume` can be made to fail on every call.
#[derive(Debug, Default)]
pub struct RecordingAudioProvider {
    tracks: Mutex<Vec<Track>>,
    play_failures: Mutex<VecDeque<ProviderError>>,
    set_volume_error: Mutex<Option<ProviderError>>,
    calls: Mutex<Vec<AudioCall>>,
}

impl RecordingAudioProvider {
    /// Create a provider whose searches come back empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the result set returned by every search.
    #[must_use]
    pub fn with_tracks(self, tracks: Vec<Track>) -> Self {
        *self.tracks.lock().unwrap() = tracks;
        self
    }

    /// Queue a failure for the next `play` call. Queued failures are
    /// consumed in order; once drained, `play` succeeds.
    pub fn queue_play_failure(&self, err: ProviderError) {
        self.play_failures.lock().unwrap().push_back(err);
    }

    /// Make every `set_volume` call fail with `err`.
    pub fn fail_set_volume(&self, err: ProviderError) {
        *self.set_volume_error.lock().unwrap() = Some(err);
    }

    /// Snapshot of all recorded calls, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<AudioCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The percent values of all `set_volume` calls, in order.
    pub fn volume_steps(&self) -> Vec<u8> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                AudioCall::SetVolume { percent } => Some(percent),
                _ => None,
            })
            .collect()
    }

    /// The URIs of all `play` calls, in order.
    pub fn played(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                AudioCall::Play { uri, .. } => Some(uri),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: AudioCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AudioProvider for RecordingAudioProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Track>, ProviderError> {
        self.record(AudioCall::Search {
            query: query.to_owned(),
            limit,
        });
        Ok(self
            .tracks
            .lock()
            .unwrap()
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn play(&self, uri: &str, start_position_ms: u64) -> Result<(), ProviderError> {
        self.record(AudioCall::Play {
            uri: uri.to_owned(),
            start_position_ms,
        });
        match self.play_failures.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn set_volume(&self, percent: u8) -> Result<(), ProviderError> {
        self.record(AudioCall::SetVolume { percent });
        match self.set_volume_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn playback_state(&self) -> Result<PlaybackState, ProviderError> {
        self.record(AudioCall::PlaybackState);
        let current_uri = self.played().pop();
        Ok(PlaybackState {
            is_playing: current_uri.is_some(),
            current_uri,
            progress_ms: 0,
        })
    }

    async fn refresh_credential(&self) -> Result<(), ProviderError> {
        self.record(AudioCall::RefreshCredential);
        Ok(())
    }
}

/// An audio provider that fails every call with
/// `ProviderError::Unavailable`. Useful for testing error-handling paths.
#[derive(Debug)]
pub struct FailingAudioProvider;

#[async_trait]
impl AudioProvider for FailingAudioProvider {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<Track>, ProviderError> {
        Err(ProviderError::Unavailable("connection refused".into()))
    }

    async fn play(&self, _uri: &str, _start_position_ms: u64) -> Result<(), ProviderError> {
        Err(ProviderError::Unavailable("connection refused".into()))
    }

    async fn set_volume(&self, _percent: u8) -> Result<(), ProviderError> {
        Err(ProviderError::Unavailable("connection refused".into()))
    }

    async fn playback_state(&self) -> Result<PlaybackState, ProviderError> {
        Err(ProviderError::Unavailable("connection refused".into()))
    }

    async fn refresh_credential(&self) -> Result<(), ProviderError> {
        Err(ProviderError::Unavailable("connection refused".into()))
    }
}

/// A TTS provider that records every synthesis request and returns fixed
/// audio bytes.
#[derive(Debug)]
pub struct RecordingTtsProvider {
    audio: Vec<u8>,
    requests: Mutex<Vec<(String, String, StyleParams)>>,
}

impl Default for RecordingTtsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingTtsProvider {
    /// Create a provider returning a small fixed MPEG-ish payload.
    #[must_use]
    pub fn new() -> Self {
        Self {
            audio: b"ID3mock-audio".to_vec(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of all `(voice_id, text, style)` synthesis requests.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<(String, String, StyleParams)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TtsProvider for RecordingTtsProvider {
    async fn synthesize(
        &self,
        voice_id: &str,
        text: &str,
        style: &StyleParams,
    ) -> Result<Vec<u8>, ProviderError> {
        self.requests
            .lock()
            .unwrap()
            .push((voice_id.to_owned(), text.to_owned(), style.clone()));
        Ok(self.audio.clone())
    }
}

/// A TTS provider that fails every call with `ProviderError::Unavailable`.
#[derive(Debug)]
pub struct FailingTtsProvider;

#[async_trait]
impl TtsProvider for FailingTtsProvider {
    async fn synthesize(
        &self,
        _voice_id: &str,
        _text: &str,
        _style: &StyleParams,
    ) -> Result<Vec<u8>, ProviderError> {
        Err(ProviderError::Unavailable("connection refused".into()))
    }
}
