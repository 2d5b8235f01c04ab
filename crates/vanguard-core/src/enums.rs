//! Enumeration types used throughout the decision engine.

use serde::{Deserialize, Serialize};

use crate::types::{Position, ShipId, TargetId};

/// Combat posture held by a ship. Mutated only by the intent controller,
/// gated by the intent-persistence cooldown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatIntent {
    /// Press the attack, closing on the target.
    #[default]
    Pursuit,
    /// Orbit the target at preferred weapon range.
    Strafe,
    /// Break away with lateral jitter to shake pursuit.
    Evade,
    /// Disengage directly away from the target.
    Retreat,
    /// Weapon lock ordered externally: hold position, fire on a tight cone.
    Locked,
}

/// Tactical situation assessment, evaluated in priority order
/// (Victory first, Neutral as the fallthrough).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TacticalSituation {
    /// Target is nearly defeated.
    Victory,
    /// We hold a clear advantage.
    Advantage,
    /// We are at a clear disadvantage.
    Disadvantage,
    /// Threat pressure too high to stand and fight.
    Overwhelmed,
    /// Even match.
    #[default]
    Neutral,
}

/// Engagement status of a tracked target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetStatus {
    /// No ships assigned.
    #[default]
    Available,
    /// At least one ship assigned, below the recommended engager count.
    Engaged,
    /// At or above the recommended engager count.
    OverkillRisk,
    /// Health reached zero.
    Destroyed,
}

/// Fleet-wide order issued by fleet command. Advisory, not authoritative:
/// it biases target selection and maneuver, but a ship at disadvantage may
/// still retreat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FleetOrder {
    /// Ships choose their own targets.
    #[default]
    FreeEngage,
    /// All ships concentrate fire on one target.
    FocusFire { target_id: TargetId },
    /// Ships without a target move to the rally point.
    Rally { point: Position },
    /// Protect a named ship; prefer targets near it.
    Defend { vip_id: ShipId },
}
