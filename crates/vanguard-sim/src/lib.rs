//! Fleet combat decision engine for VANGUARD.
//!
//! Owns the hecs ECS world of controlled ships, the targeting service,
//! and fleet command; runs the decision systems at a fixed tick rate and
//! produces DecisionSnapshots for the movement and weapon layers.

pub mod command;
pub mod engine;
pub mod error;
pub mod systems;
pub mod targeting;

pub use vanguard_core as core;
pub use engine::FleetEngine;

#[cfg(test)]
mod tests;
