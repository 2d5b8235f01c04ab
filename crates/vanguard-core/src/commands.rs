//! Commands sent to the decision engine by the outer game layer.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::FleetOrder;
use crate::types::ShipId;

/// All possible fleet-level inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FleetCommand {
    /// Issue a fleet-wide order.
    IssueOrder { order: FleetOrder },
    /// Revert to free engage.
    ClearOrder,
    /// Adjust one ship's aggression (clamped to 0..1).
    SetAggression { ship_id: ShipId, aggression: f64 },
    /// Engage or release an externally ordered weapon lock.
    SetWeaponLock { ship_id: ShipId, locked: bool },
}
