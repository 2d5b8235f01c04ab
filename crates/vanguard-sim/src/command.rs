//! Fleet command — fleet-wide orders and formation bias vectors.
//!
//! Orders are advisory: they bias target selection and maneuver but never
//! replace per-ship autonomy. A ship at disadvantage may still retreat.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use vanguard_core::constants::DISTANCE_EPSILON;
use vanguard_core::enums::{FleetOrder, TargetStatus};
use vanguard_core::events::CombatEvent;
use vanguard_core::types::Position;

use crate::targeting::TargetingService;

/// Holds the current fleet-wide order and derives per-ship bias inputs.
#[derive(Debug, Clone, Default)]
pub struct FleetCommander {
    order: FleetOrder,
}

impl FleetCommander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new fleet-wide order, read by all ships next tick.
    pub fn issue_order(&mut self, order: FleetOrder) {
        info!(?order, "fleet order issued");
        self.order = order;
    }

    /// Revert to free engage.
    pub fn clear_order(&mut self) {
        self.order = FleetOrder::FreeEngage;
    }

    /// The order as issued.
    pub fn order(&self) -> FleetOrder {
        self.order
    }

    /// Resolve the order to apply this tick. A focus-fire order whose
    /// target no longer exists (or is destroyed) degrades to free engage
    /// for the tick and records a warning event.
    pub fn effective_order(&self, targeting: &TargetingService) -> (FleetOrder, Option<CombatEvent>) {
        if let FleetOrder::FocusFire { target_id } = self.order {
            let alive = targeting
                .target(target_id)
                .map(|t| t.status != TargetStatus::Destroyed)
                .unwrap_or(false);
            if !alive {
                warn!(target_id, "focus-fire target lost, free engage this tick");
                return (
                    FleetOrder::FreeEngage,
                    Some(CombatEvent::FocusTargetLost { target_id }),
                );
            }
        }
        (self.order, None)
    }

    /// Geometric centroid of the given ship positions.
    pub fn fleet_centroid(positions: &[Position]) -> Position {
        if positions.is_empty() {
            return Position::default();
        }
        let sum = positions
            .iter()
            .fold(DVec2::ZERO, |acc, p| acc + p.as_dvec2());
        Position::from_dvec2(sum / positions.len() as f64)
    }

    /// Normalized bias vectors for a higher-level behavior model.
    /// The focus vector is zero unless a live focus-fire target exists.
    pub fn bias(
        &self,
        ship_position: &Position,
        centroid: &Position,
        targeting: &TargetingService,
    ) -> CommandBias {
        let to_centroid = normalized_toward(ship_position, centroid);

        let to_focus = match self.order {
            FleetOrder::FocusFire { target_id } => targeting
                .target(target_id)
                .filter(|t| t.status != TargetStatus::Destroyed)
                .map(|t| normalized_toward(ship_position, &t.position))
                .unwrap_or([0.0, 0.0]),
            _ => [0.0, 0.0],
        };

        CommandBias {
            to_fleet_centroid: to_centroid,
            to_focus_target: to_focus,
        }
    }
}

/// Normalized steering inputs exposed to a behavior model. The input
/// order is a fixed contract, not a convention: see `as_input_vector`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandBias {
    /// Unit vector from the ship toward the fleet centroid.
    pub to_fleet_centroid: [f64; 2],
    /// Unit vector from the ship toward the focus-fire target, or zero.
    pub to_focus_target: [f64; 2],
}

impl CommandBias {
    /// Fixed input order: `[centroid_x, centroid_y, focus_x, focus_y]`.
    pub fn as_input_vector(&self) -> [f64; 4] {
        [
            self.to_fleet_centroid[0],
            self.to_fleet_centroid[1],
            self.to_focus_target[0],
            self.to_focus_target[1],
        ]
    }
}

/// Unit vector from `from` toward `to`, with an epsilon-padded length so
/// coincident points produce a near-zero vector instead of NaN.
fn normalized_toward(from: &Position, to: &Position) -> [f64; 2] {
    let delta = to.as_dvec2() - from.as_dvec2();
    let length = delta.length() + DISTANCE_EPSILON;
    [delta.x / length, delta.y / length]
}
