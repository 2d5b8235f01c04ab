//! Fire controller — the fire/no-fire decision.
//!
//! Hit, crit, and damage math belong to the weapon resolution layer;
//! this module only gates the trigger.

use vanguard_core::constants::*;
use vanguard_core::enums::CombatIntent;

use crate::assessor::TacticalPosition;

/// Weapon readiness mirrored from the weapon system.
#[derive(Debug, Clone, Copy)]
pub struct WeaponStatus {
    /// Maximum effective range (world units).
    pub range: f64,
    /// True when the cooldown has elapsed.
    pub ready: bool,
}

/// Maximum firing cone half-angle for an intent (degrees).
pub fn max_fire_angle_deg(intent: CombatIntent) -> f64 {
    match intent {
        CombatIntent::Strafe => FIRE_ANGLE_STRAFE_DEG,
        CombatIntent::Locked => FIRE_ANGLE_LOCKED_DEG,
        _ => FIRE_ANGLE_DEFAULT_DEG,
    }
}

/// Fire only when the weapon is ready, the target is in range, and the
/// target sits inside the intent's firing cone.
pub fn should_fire(intent: CombatIntent, tactical: &TacticalPosition, weapon: &WeaponStatus) -> bool {
    if !weapon.ready {
        return false;
    }
    if tactical.distance > weapon.range {
        return false;
    }
    tactical.relative_angle_deg.abs() <= max_fire_angle_deg(intent)
}
