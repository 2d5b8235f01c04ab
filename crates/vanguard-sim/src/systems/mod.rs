//! Decision systems, run in a fixed order each tick by the engine.

pub mod decision;
pub mod roster;
pub mod snapshot;
