//! Roster sync — reconcile the external world registry into the engine.
//!
//! Controlled ships are mirrored into the ECS world; enemy ships feed the
//! targeting service. Ships and targets that left the simulation are
//! dropped, and destruction releases engagers immediately.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use tracing::debug;

use vanguard_core::components::*;
use vanguard_core::config::EngineConfig;
use vanguard_core::constants::DISTANCE_EPSILON;
use vanguard_core::enums::TargetStatus;
use vanguard_core::events::CombatEvent;
use vanguard_core::observation::{FrameInput, ShipObservation};
use vanguard_core::types::{Position, ShipId, TargetId, Velocity};

use crate::targeting::TargetingService;

/// Run the roster sync for one tick.
pub fn run(
    world: &mut World,
    ships: &mut BTreeMap<ShipId, Entity>,
    targeting: &mut TargetingService,
    config: &EngineConfig,
    frame: &FrameInput,
    current_tick: u64,
    events: &mut Vec<CombatEvent>,
) {
    let mut seen_controlled: Vec<ShipId> = Vec::new();
    let mut seen_hostiles: Vec<TargetId> = Vec::new();
    let mut fleet_dps = 0.0;

    for obs in &frame.ships {
        if obs.faction == config.controlled_faction {
            if !obs.is_alive() {
                continue; // dead ships fall out via the removal pass
            }
            seen_controlled.push(obs.id);
            fleet_dps += obs.weapon.damage / obs.weapon.cooldown_secs.max(DISTANCE_EPSILON);
            upsert_ship(world, ships, config, obs, current_tick);
        } else {
            seen_hostiles.push(obs.id);
            if obs.is_alive() {
                targeting.add_target(
                    obs.id,
                    obs.position,
                    obs.armor,
                    obs.hull_frac,
                    obs.threat_level,
                );
                // A target added this tick always exists, so this cannot fail.
                let _ = targeting.update_kinematics(
                    obs.id,
                    obs.position,
                    obs.velocity,
                    obs.shield_frac,
                    obs.weapon.range,
                );
            } else {
                destroy_target(targeting, obs.id, events);
            }
        }
    }

    // Controlled ships that died or left the roster.
    // Collect in a buffer to avoid borrow issues with hecs.
    let gone: Vec<(Entity, ShipId)> = {
        let mut query = world.query::<(&Combatant, &ShipTag)>();
        query
            .iter()
            .filter(|(_, (_, tag))| !seen_controlled.contains(&tag.id))
            .map(|(entity, (_, tag))| (entity, tag.id))
            .collect()
    };
    for (entity, ship_id) in gone {
        let _ = world.despawn(entity);
        ships.remove(&ship_id);
        if let Some(target_id) = targeting.release_ship(ship_id) {
            events.push(CombatEvent::AssignmentReleased { ship_id, target_id });
        }
        debug!(ship_id, "controlled ship left the roster");
    }

    // Targets that left the simulation entirely.
    let stale: Vec<TargetId> = targeting
        .targets()
        .map(|t| t.id)
        .filter(|id| !seen_hostiles.contains(id))
        .collect();
    for target_id in stale {
        if let Ok(released) = targeting.remove_target(target_id) {
            for ship_id in released {
                events.push(CombatEvent::AssignmentReleased { ship_id, target_id });
            }
        }
    }

    targeting.set_fleet_dps(fleet_dps);
}

/// Destroy a tracked target's record once, releasing its engagers.
fn destroy_target(targeting: &mut TargetingService, id: TargetId, events: &mut Vec<CombatEvent>) {
    let already_destroyed = match targeting.target(id) {
        Some(record) => record.status == TargetStatus::Destroyed,
        None => true, // died before it was ever tracked
    };
    if already_destroyed {
        return;
    }
    if let Ok(released) = targeting.update_health(id, 0.0) {
        events.push(CombatEvent::TargetDestroyed {
            target_id: id,
            released_engagers: released.len() as u32,
        });
    }
}

/// Mirror one controlled ship into the ECS world.
fn upsert_ship(
    world: &mut World,
    ships: &mut BTreeMap<ShipId, Entity>,
    config: &EngineConfig,
    obs: &ShipObservation,
    current_tick: u64,
) {
    let weapon = WeaponMount {
        range: obs.weapon.range,
        damage: obs.weapon.damage,
        cooldown_secs: obs.weapon.cooldown_secs,
        cooldown_remaining: obs.weapon.cooldown_remaining,
    };

    if let Some(&entity) = ships.get(&obs.id) {
        if let Ok(mut position) = world.get::<&mut Position>(entity) {
            *position = obs.position;
        }
        if let Ok(mut velocity) = world.get::<&mut Velocity>(entity) {
            *velocity = obs.velocity;
        }
        if let Ok(mut heading) = world.get::<&mut Heading>(entity) {
            heading.degrees = obs.heading_deg;
        }
        if let Ok(mut hull) = world.get::<&mut HullState>(entity) {
            hull.hull_frac = obs.hull_frac;
            hull.shield_frac = obs.shield_frac;
        }
        if let Ok(mut mount) = world.get::<&mut WeaponMount>(entity) {
            *mount = weapon;
        }
        return;
    }

    // Fresh ships hold their initial posture for one persistence window.
    let entity = world.spawn((
        Combatant,
        ShipTag {
            id: obs.id,
            faction: obs.faction,
        },
        obs.position,
        obs.velocity,
        Heading {
            degrees: obs.heading_deg,
        },
        HullState {
            hull_frac: obs.hull_frac,
            shield_frac: obs.shield_frac,
        },
        weapon,
        Doctrine {
            aggression: config.profile.aggression,
        },
        IntentState {
            intent: Default::default(),
            last_switch_tick: current_tick,
            weapon_lock: false,
        },
    ));
    ships.insert(obs.id, entity);
    debug!(ship_id = obs.id, "controlled ship joined the roster");
}
