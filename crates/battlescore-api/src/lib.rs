//! Battlescore API — HTTP surface over the Battle Director.

pub mod error;
pub mod jobs;
pub mod routes;
pub mod sim;
pub mod state;
