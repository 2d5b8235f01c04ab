//! Maneuver planner — converts intent into a desired waypoint.
//!
//! Emits positions only; translating a waypoint into thrust and rotation
//! is the movement system's job.

use glam::DVec2;
use rand::Rng;

use vanguard_core::config::CombatProfile;
use vanguard_core::constants::*;
use vanguard_core::enums::CombatIntent;
use vanguard_core::types::Position;

use crate::assessor::{OwnShipState, TacticalPosition, TargetShipState};

/// Plan the waypoint for the current intent.
pub fn plan(
    intent: CombatIntent,
    own: &OwnShipState,
    target: &TargetShipState,
    tactical: &TacticalPosition,
    profile: &CombatProfile,
    rng: &mut impl Rng,
) -> Position {
    match intent {
        CombatIntent::Pursuit => pursuit_waypoint(own, target, tactical, profile),
        CombatIntent::Strafe => strafe_waypoint(own, target, profile),
        CombatIntent::Evade => evade_waypoint(own, target, profile, rng),
        CombatIntent::Retreat => retreat_waypoint(own, target, profile),
        CombatIntent::Locked => locked_waypoint(own, target, tactical, profile),
    }
}

/// Pursuit: close on a short-horizon predicted intercept point; once inside
/// preferred range, flank instead of closing head-on when approaching from
/// a wide angle.
fn pursuit_waypoint(
    own: &OwnShipState,
    target: &TargetShipState,
    tactical: &TacticalPosition,
    profile: &CombatProfile,
) -> Position {
    if tactical.distance <= profile.preferred_range
        && tactical.relative_angle_deg.abs() > FLANK_ANGLE_DEG
    {
        // Offset perpendicular to the bearing, on the side we already lean toward.
        let to_target = direction(own.position.as_dvec2(), target.position.as_dvec2());
        let side = if tactical.relative_angle_deg >= 0.0 {
            1.0
        } else {
            -1.0
        };
        let flank = target.position.as_dvec2() + to_target.perp() * side * profile.preferred_range;
        return Position::from_dvec2(flank);
    }

    let predicted = target.position.as_dvec2()
        + target.velocity.as_dvec2() * profile.intercept_lookahead_secs;
    Position::from_dvec2(predicted)
}

/// Strafe: orbit at preferred range by aiming perpendicular to the
/// target bearing.
fn strafe_waypoint(own: &OwnShipState, target: &TargetShipState, profile: &CombatProfile) -> Position {
    let to_target = direction(own.position.as_dvec2(), target.position.as_dvec2());
    let orbit = target.position.as_dvec2() + to_target.perp() * profile.preferred_range;
    Position::from_dvec2(orbit)
}

/// Evade: away from the target with a randomized lateral jitter.
fn evade_waypoint(
    own: &OwnShipState,
    target: &TargetShipState,
    profile: &CombatProfile,
    rng: &mut impl Rng,
) -> Position {
    let away = direction(target.position.as_dvec2(), own.position.as_dvec2());
    let jitter_deg = rng.gen_range(-EVADE_JITTER_DEG..=EVADE_JITTER_DEG);
    let rotated = DVec2::from_angle(jitter_deg.to_radians()).rotate(away);
    let waypoint =
        own.position.as_dvec2() + rotated * profile.min_safe_distance * EVADE_DISTANCE_FACTOR;
    Position::from_dvec2(waypoint)
}

/// Retreat: directly away from the target at maximum engagement range.
fn retreat_waypoint(
    own: &OwnShipState,
    target: &TargetShipState,
    profile: &CombatProfile,
) -> Position {
    let away = direction(target.position.as_dvec2(), own.position.as_dvec2());
    let waypoint = own.position.as_dvec2() + away * profile.max_engagement_range;
    Position::from_dvec2(waypoint)
}

/// Locked: hold position; nudge away only when the target crowds in
/// under the preferred range.
fn locked_waypoint(
    own: &OwnShipState,
    target: &TargetShipState,
    tactical: &TacticalPosition,
    profile: &CombatProfile,
) -> Position {
    if tactical.distance < profile.preferred_range - LOCKED_CLOSE_TOLERANCE {
        let away = direction(target.position.as_dvec2(), own.position.as_dvec2());
        let waypoint = own.position.as_dvec2() + away * LOCKED_NUDGE_DISTANCE;
        return Position::from_dvec2(waypoint);
    }
    own.position
}

/// Unit vector from `from` toward `to`, with an epsilon floor so
/// coincident points fall back to +X instead of NaN.
fn direction(from: DVec2, to: DVec2) -> DVec2 {
    let delta = to - from;
    let len = delta.length();
    if len < DISTANCE_EPSILON {
        DVec2::X
    } else {
        delta / len
    }
}
