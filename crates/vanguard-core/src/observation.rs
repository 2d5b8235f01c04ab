//! Per-tick observations consumed from the physics layer and world registry.
//!
//! The decision engine reads these mirrors each tick; it never writes back.

use serde::{Deserialize, Serialize};

use crate::types::{FactionId, Position, ShipId, Velocity};

/// One tick's worth of world state: the live roster of all known ships,
/// friend and foe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameInput {
    pub ships: Vec<ShipObservation>,
}

/// Read-only state of a single ship as reported by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipObservation {
    pub id: ShipId,
    pub faction: FactionId,
    pub position: Position,
    pub velocity: Velocity,
    /// Heading in degrees (0 = +X axis, counter-clockwise positive).
    pub heading_deg: f64,
    /// Hull integrity fraction (0..1). Zero means the ship is dead.
    pub hull_frac: f64,
    /// Shield strength fraction (0..1).
    pub shield_frac: f64,
    /// Flat damage reduction stat (meaningful for hostile ships).
    pub armor: f64,
    /// Assessed threat level (0..1, meaningful for hostile ships).
    pub threat_level: f64,
    pub weapon: WeaponObservation,
}

/// Read-only weapon state as reported by the weapon system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponObservation {
    /// Maximum effective range (world units).
    pub range: f64,
    /// Damage per shot.
    pub damage: f64,
    /// Full cooldown period between shots (seconds).
    pub cooldown_secs: f64,
    /// Seconds until ready again (0 = ready).
    pub cooldown_remaining: f64,
}

impl ShipObservation {
    pub fn is_alive(&self) -> bool {
        self.hull_frac > 0.0
    }
}
