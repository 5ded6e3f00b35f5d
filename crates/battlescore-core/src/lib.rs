//! Battlescore Core — shared domain abstractions.
//!
//! This crate defines the provider capabilities, error taxonomy, and
//! determinism seams (clock, RNG) that the director and voice contexts
//! depend on. It contains no HTTP wiring and no provider clients.

pub mod clock;
pub mod error;
pub mod provider;
pub mod rng;
pub mod track;
