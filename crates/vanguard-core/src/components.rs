//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Decision logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::CombatIntent;
use crate::types::{FactionId, ShipId};

/// Marks an entity as a ship under this engine's control.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Combatant;

/// Identity of a controlled ship within the world registry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipTag {
    pub id: ShipId,
    pub faction: FactionId,
}

/// Heading mirrored from the physics layer (degrees, 0 = +X axis,
/// counter-clockwise positive).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Heading {
    pub degrees: f64,
}

/// Hull and shield state mirrored from the damage model (0..1 fractions).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HullState {
    pub hull_frac: f64,
    pub shield_frac: f64,
}

/// Weapon mount state mirrored from the weapon system. The decision engine
/// never resolves damage; it only reads range and cooldown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeaponMount {
    /// Maximum effective range (world units).
    pub range: f64,
    /// Damage per shot (used only for the fleet DPS estimate).
    pub damage: f64,
    /// Full cooldown period between shots (seconds).
    pub cooldown_secs: f64,
    /// Seconds until the weapon is ready again (0 = ready).
    pub cooldown_remaining: f64,
}

/// Per-ship doctrine knobs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Doctrine {
    /// 0.0 = defensive, 1.0 = aggressive.
    pub aggression: f64,
}

/// Per-ship combat posture state, mutated only by the decision system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IntentState {
    pub intent: CombatIntent,
    /// Tick at which the current intent was adopted (for the hysteresis gate).
    pub last_switch_tick: u64,
    /// Weapon lock ordered externally; suspends the rule table while set.
    #[serde(default)]
    pub weapon_lock: bool,
}

// Position and Velocity from types.rs are used as ECS components as well.
