//! Shared test mocks and utilities for the Battlescore audio director.

mod clock;
mod provider;
mod rng;

pub use clock::FixedClock;
pub use provider::{
    AudioCall, FailingAudioProvider, FailingTtsProvider, RecordingAudioProvider,
    RecordingTtsProvider, sample_tracks,
};
pub use rng::{MockRng, SequenceRng};
