//! Battlescore — Battle Director bounded context.
//!
//! Tracks encounter progress (normal fights and multi-phase boss fights),
//! selects music for context and phase, drives volume transitions that
//! simulate crossfades, and turns free-text narration into battle events.

pub mod director;
pub mod narration;
pub mod selector;
pub mod state;
pub mod volume;
