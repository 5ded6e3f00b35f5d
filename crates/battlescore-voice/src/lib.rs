//! Battlescore — character voice synthesis context.
//!
//! Resolves characters against a static voice registry and merges the
//! requested emotion into a synthesis style payload.

pub mod emotion;
pub mod registry;
