//! Snapshot system — assemble the per-tick decision output.

use vanguard_core::enums::FleetOrder;
use vanguard_core::events::CombatEvent;
use vanguard_core::state::{DecisionSnapshot, ShipDecisionView};
use vanguard_core::types::SimTime;

use crate::targeting::TargetingService;

/// Build the snapshot handed to the movement, weapon, and telemetry layers.
pub fn build_snapshot(
    time: SimTime,
    order: FleetOrder,
    decisions: Vec<ShipDecisionView>,
    targeting: &TargetingService,
    events: Vec<CombatEvent>,
) -> DecisionSnapshot {
    DecisionSnapshot {
        time,
        order,
        decisions,
        targeting: targeting.summary(),
        events,
    }
}
