//! Decision snapshot — the complete engine output produced each tick.
//!
//! Snapshots are read-only: telemetry and the movement/weapon layers
//! consume them, nothing mutates engine state through them.

use serde::{Deserialize, Serialize};

use crate::enums::{CombatIntent, FleetOrder, TacticalSituation};
use crate::events::CombatEvent;
use crate::types::{Position, ShipId, SimTime, TargetId};

/// Complete decision output for one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionSnapshot {
    pub time: SimTime,
    /// The fleet order as issued (before any stale-focus degradation).
    pub order: FleetOrder,
    /// Per-ship decisions in ascending ship-id order.
    pub decisions: Vec<ShipDecisionView>,
    pub targeting: TargetingView,
    pub events: Vec<CombatEvent>,
}

/// One ship's decisions for this tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipDecisionView {
    pub ship_id: ShipId,
    /// Assigned target, if any.
    pub target_id: Option<TargetId>,
    /// Situation assessed against the assigned target (None when idle).
    pub situation: Option<TacticalSituation>,
    pub intent: CombatIntent,
    /// Desired waypoint for the movement system (None = hold position).
    pub waypoint: Option<Position>,
    /// Fire decision for the weapon system.
    pub should_fire: bool,
}

/// Targeting service status for monitoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetingView {
    pub total_targets: u32,
    pub available: u32,
    pub engaged: u32,
    pub overkill_risk: u32,
    pub destroyed: u32,
    /// Ships currently holding an assignment.
    pub assigned_ships: u32,
    /// Fleet damage-per-second estimate used for escalation.
    pub fleet_dps: f64,
}
