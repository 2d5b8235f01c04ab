//! Tactical assessor — relative geometry and advantage/threat estimates.
//!
//! Pure and stateless: one own-ship state and one candidate target in,
//! one `TacticalPosition` out, recomputed every tick and never persisted.

use vanguard_core::config::CombatProfile;
use vanguard_core::constants::*;
use vanguard_core::enums::TacticalSituation;
use vanguard_core::types::{normalize_angle_deg, Position, Velocity};

/// Own-ship inputs, mirrored read-only from the physics layer.
#[derive(Debug, Clone, Copy)]
pub struct OwnShipState {
    pub position: Position,
    pub velocity: Velocity,
    /// Degrees, 0 = +X axis, counter-clockwise positive.
    pub heading_deg: f64,
    pub hull_frac: f64,
    pub shield_frac: f64,
    pub weapon_range: f64,
}

/// Candidate target inputs.
#[derive(Debug, Clone, Copy)]
pub struct TargetShipState {
    pub position: Position,
    pub velocity: Velocity,
    /// Hull integrity fraction (0..1); doubles as the target's health.
    pub health_fraction: f64,
    pub shield_frac: f64,
    pub weapon_range: f64,
}

/// Ephemeral relative-geometry assessment between one ship and one target.
#[derive(Debug, Clone, Copy)]
pub struct TacticalPosition {
    /// Distance to the target (world units).
    pub distance: f64,
    /// Bearing to the target relative to own heading, degrees in (-180, 180].
    pub relative_angle_deg: f64,
    /// Magnitude of the relative velocity.
    pub relative_speed: f64,
    /// Line-of-sight component of relative velocity; positive = closing.
    pub closing_speed: f64,
    /// Clamped to [-1, 1]; positive favors us.
    pub advantage_score: f64,
    /// Clamped to [0, 1].
    pub threat_score: f64,
}

impl TacticalPosition {
    /// Within the preferred range band (preferred +/- tolerance)?
    pub fn is_within_preferred_range(&self, profile: &CombatProfile) -> bool {
        (self.distance - profile.preferred_range).abs() <= profile.range_tolerance
    }

    /// Closer than the minimum safe distance?
    pub fn is_dangerously_close(&self, profile: &CombatProfile) -> bool {
        self.distance < profile.min_safe_distance
    }
}

/// Assess the tactical position of `own` relative to `target`.
pub fn assess(
    own: &OwnShipState,
    target: &TargetShipState,
    profile: &CombatProfile,
) -> TacticalPosition {
    let delta = target.position.as_dvec2() - own.position.as_dvec2();
    let distance = delta.length();

    let relative_angle_deg =
        normalize_angle_deg(own.position.bearing_deg_to(&target.position) - own.heading_deg);

    let rel_v = target.velocity.as_dvec2() - own.velocity.as_dvec2();
    let relative_speed = rel_v.length();
    // Rate of change of the separation, negated so positive means closing.
    let closing_speed = if distance > DISTANCE_EPSILON {
        -delta.dot(rel_v) / distance
    } else {
        relative_speed
    };

    let advantage_score = advantage_score(own, target, distance);
    let threat_score = threat_score(target, distance, closing_speed, profile);

    TacticalPosition {
        distance,
        relative_angle_deg,
        relative_speed,
        closing_speed,
        advantage_score,
        threat_score,
    }
}

fn advantage_score(own: &OwnShipState, target: &TargetShipState, distance: f64) -> f64 {
    let mut score = 0.0;

    score += (own.hull_frac - target.health_fraction) * ADVANTAGE_HULL_WEIGHT;
    score += (own.shield_frac - target.shield_frac) * ADVANTAGE_SHIELD_WEIGHT;

    if distance <= own.weapon_range {
        score += ADVANTAGE_IN_RANGE_BONUS;
    }

    let speed_diff = own.velocity.speed() - target.velocity.speed();
    score += (speed_diff / ADVANTAGE_SPEED_SCALE) * ADVANTAGE_SPEED_WEIGHT;

    score.clamp(-1.0, 1.0)
}

fn threat_score(
    target: &TargetShipState,
    distance: f64,
    closing_speed: f64,
    profile: &CombatProfile,
) -> f64 {
    let mut threat = 0.0;

    // Proximity: 0 at the safe distance, 1 at point-blank.
    if distance < profile.min_safe_distance {
        threat += (profile.min_safe_distance - distance) / profile.min_safe_distance;
    }

    if distance <= target.weapon_range {
        threat += THREAT_IN_RANGE_TERM;
    }

    if closing_speed > THREAT_CLOSING_SPEED {
        threat += THREAT_CLOSING_TERM;
    }

    threat.clamp(0.0, 1.0)
}

/// Classify the overall situation. Checks run in priority order;
/// the first match wins.
pub fn classify(tactical: &TacticalPosition, target_health_fraction: f64) -> TacticalSituation {
    if target_health_fraction < VICTORY_HEALTH_FRACTION {
        TacticalSituation::Victory
    } else if tactical.advantage_score > ADVANTAGE_SCORE_THRESHOLD {
        TacticalSituation::Advantage
    } else if tactical.advantage_score < -ADVANTAGE_SCORE_THRESHOLD {
        TacticalSituation::Disadvantage
    } else if tactical.threat_score > OVERWHELMED_THREAT_THRESHOLD {
        TacticalSituation::Overwhelmed
    } else {
        TacticalSituation::Neutral
    }
}
