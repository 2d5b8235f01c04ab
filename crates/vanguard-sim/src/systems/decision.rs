//! Per-ship decision pipeline: assign, assess, intent, maneuver, fire.
//!
//! Ships are processed in ascending ship-id order so that tie-breaks and
//! capacity exhaustion are reproducible across runs.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use vanguard_core::components::{Doctrine, Heading, HullState, IntentState, WeaponMount};
use vanguard_core::config::EngineConfig;
use vanguard_core::constants::DT;
use vanguard_core::enums::FleetOrder;
use vanguard_core::events::CombatEvent;
use vanguard_core::state::ShipDecisionView;
use vanguard_core::types::{Position, ShipId, TargetId, Velocity};

use vanguard_tactics::assessor::{self, OwnShipState, TargetShipState};
use vanguard_tactics::fire::{self, WeaponStatus};
use vanguard_tactics::intent::{self, IntentContext};
use vanguard_tactics::maneuver;

use crate::targeting::TargetingService;

/// Run the decision pipeline for every controlled ship.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    ships: &BTreeMap<ShipId, Entity>,
    targeting: &mut TargetingService,
    effective_order: FleetOrder,
    config: &EngineConfig,
    rng: &mut ChaCha8Rng,
    current_tick: u64,
    events: &mut Vec<CombatEvent>,
) -> Vec<ShipDecisionView> {
    let preference = order_preference(&effective_order, world, ships, targeting);
    let idle_waypoint = order_idle_waypoint(&effective_order, world, ships);

    let mut decisions = Vec::with_capacity(ships.len());
    for (&ship_id, &entity) in ships {
        let state = match read_ship(world, entity) {
            Some(s) => s,
            None => continue,
        };

        let assigned = update_assignment(targeting, ship_id, preference, events);

        let record = match assigned.and_then(|t| targeting.target(t)).cloned() {
            Some(r) => r,
            None => {
                // No target anywhere: idle toward the order's fallback point,
                // holding the last known posture.
                decisions.push(ShipDecisionView {
                    ship_id,
                    target_id: None,
                    situation: None,
                    intent: state.intent.intent,
                    waypoint: idle_waypoint,
                    should_fire: false,
                });
                continue;
            }
        };

        let own = OwnShipState {
            position: state.position,
            velocity: state.velocity,
            heading_deg: state.heading_deg,
            hull_frac: state.hull.hull_frac,
            shield_frac: state.hull.shield_frac,
            weapon_range: state.weapon.range,
        };
        let target = TargetShipState {
            position: record.position,
            velocity: record.velocity,
            health_fraction: record.health_fraction,
            shield_frac: record.shield_frac,
            weapon_range: record.weapon_range,
        };

        let tactical = assessor::assess(&own, &target, &config.profile);
        let situation = assessor::classify(&tactical, record.health_fraction);

        let elapsed =
            current_tick.saturating_sub(state.intent.last_switch_tick) as f64 * DT;
        let update = intent::evaluate(&IntentContext {
            current: state.intent.intent,
            elapsed_since_switch_secs: elapsed,
            weapon_lock: state.intent.weapon_lock,
            situation,
            tactical: &tactical,
            own_hull_frac: state.hull.hull_frac,
            aggression: state.aggression,
            profile: &config.profile,
        });
        if update.changed {
            if let Ok(mut intent_state) = world.get::<&mut IntentState>(entity) {
                intent_state.intent = update.new_intent;
                intent_state.last_switch_tick = current_tick;
            }
            events.push(CombatEvent::IntentSwitched {
                ship_id,
                from: state.intent.intent,
                to: update.new_intent,
                situation,
            });
            debug!(ship_id, intent = ?update.new_intent, "intent switched");
        }
        let current_intent = update.new_intent;

        let waypoint = maneuver::plan(
            current_intent,
            &own,
            &target,
            &tactical,
            &config.profile,
            rng,
        );
        let should_fire = fire::should_fire(
            current_intent,
            &tactical,
            &WeaponStatus {
                range: state.weapon.range,
                ready: state.weapon.cooldown_remaining <= 0.0,
            },
        );

        decisions.push(ShipDecisionView {
            ship_id,
            target_id: assigned,
            situation: Some(situation),
            intent: current_intent,
            waypoint: Some(waypoint),
            should_fire,
        });
    }
    decisions
}

/// Component copies for one controlled ship.
struct ShipComponents {
    position: Position,
    velocity: Velocity,
    heading_deg: f64,
    hull: HullState,
    weapon: WeaponMount,
    aggression: f64,
    intent: IntentState,
}

fn read_ship(world: &World, entity: Entity) -> Option<ShipComponents> {
    let mut query = world
        .query_one::<(
            &Position,
            &Velocity,
            &Heading,
            &HullState,
            &WeaponMount,
            &Doctrine,
            &IntentState,
        )>(entity)
        .ok()?;
    let (position, velocity, heading, hull, weapon, doctrine, intent) = query.get()?;
    Some(ShipComponents {
        position: *position,
        velocity: *velocity,
        heading_deg: heading.degrees,
        hull: *hull,
        weapon: *weapon,
        aggression: doctrine.aggression,
        intent: *intent,
    })
}

/// Keep the current assignment, or take the ordered preference when it
/// differs and can actually accept another engager; otherwise find a
/// target only if the ship has none.
fn update_assignment(
    targeting: &mut TargetingService,
    ship_id: ShipId,
    preference: Option<TargetId>,
    events: &mut Vec<CombatEvent>,
) -> Option<TargetId> {
    let current = targeting.ship_target(ship_id);

    if let Some(pref) = preference {
        if current != Some(pref) && targeting.can_accept(pref) {
            let assigned = targeting.assign_ship(ship_id, Some(pref));
            if let Some(prior) = current {
                events.push(CombatEvent::AssignmentReleased {
                    ship_id,
                    target_id: prior,
                });
            }
            if let Some(target_id) = assigned {
                events.push(CombatEvent::AssignmentMade { ship_id, target_id });
            }
            return assigned;
        }
    }

    match current {
        Some(target_id) => Some(target_id),
        None => {
            let assigned = targeting.assign_ship(ship_id, None);
            if let Some(target_id) = assigned {
                events.push(CombatEvent::AssignmentMade { ship_id, target_id });
            }
            assigned
        }
    }
}

/// Target preference implied by the fleet order.
fn order_preference(
    effective_order: &FleetOrder,
    world: &World,
    ships: &BTreeMap<ShipId, Entity>,
    targeting: &TargetingService,
) -> Option<TargetId> {
    match *effective_order {
        FleetOrder::FocusFire { target_id } => Some(target_id),
        FleetOrder::Defend { vip_id } => {
            let vip_pos = ship_position(world, ships, vip_id)?;
            nearest_live_target(targeting, &vip_pos)
        }
        _ => None,
    }
}

/// Fallback waypoint for ships with nothing to shoot at.
fn order_idle_waypoint(
    effective_order: &FleetOrder,
    world: &World,
    ships: &BTreeMap<ShipId, Entity>,
) -> Option<Position> {
    match *effective_order {
        FleetOrder::Rally { point } => Some(point),
        FleetOrder::Defend { vip_id } => ship_position(world, ships, vip_id),
        _ => None,
    }
}

fn ship_position(
    world: &World,
    ships: &BTreeMap<ShipId, Entity>,
    ship_id: ShipId,
) -> Option<Position> {
    let entity = *ships.get(&ship_id)?;
    world.get::<&Position>(entity).ok().map(|p| *p)
}

/// Closest non-destroyed target to a point; ties break to the lowest id.
fn nearest_live_target(targeting: &TargetingService, point: &Position) -> Option<TargetId> {
    let mut best: Option<(TargetId, f64)> = None;
    for record in targeting.targets() {
        if record.health_fraction <= 0.0 {
            continue;
        }
        let distance = point.distance_to(&record.position);
        let better = match best {
            None => true,
            Some((_, best_distance)) => distance < best_distance,
        };
        if better {
            best = Some((record.id, distance));
        }
    }
    best.map(|(id, _)| id)
}
