//! Events emitted by the decision engine for telemetry consumers.

use serde::{Deserialize, Serialize};

use crate::enums::{CombatIntent, TacticalSituation};
use crate::types::{ShipId, TargetId};

/// Telemetry events included in each tick's snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A ship was assigned to a target.
    AssignmentMade { ship_id: ShipId, target_id: TargetId },
    /// A ship's assignment was released.
    AssignmentReleased { ship_id: ShipId, target_id: TargetId },
    /// A target's health reached zero; its engagers were released.
    TargetDestroyed {
        target_id: TargetId,
        released_engagers: u32,
    },
    /// Excess engagers were pulled off an over-assigned target.
    OverkillRedistributed { target_id: TargetId, released: u32 },
    /// A ship switched combat posture.
    IntentSwitched {
        ship_id: ShipId,
        from: CombatIntent,
        to: CombatIntent,
        situation: TacticalSituation,
    },
    /// A focus-fire order references a target that no longer exists.
    /// The fleet falls back to free engage for this tick. Warning-level.
    FocusTargetLost { target_id: TargetId },
}
