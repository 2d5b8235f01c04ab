//! Decision engine constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Floor applied to distances before division, so coincident positions
/// never divide by zero.
pub const DISTANCE_EPSILON: f64 = 0.001;

// --- Advantage score (tactical assessor) ---

/// Weight of the hull-integrity differential.
pub const ADVANTAGE_HULL_WEIGHT: f64 = 0.3;

/// Weight of the shield-strength differential.
pub const ADVANTAGE_SHIELD_WEIGHT: f64 = 0.2;

/// Contribution when the target is inside own weapon range.
pub const ADVANTAGE_IN_RANGE_BONUS: f64 = 0.3;

/// Weight of the speed differential.
pub const ADVANTAGE_SPEED_WEIGHT: f64 = 0.2;

/// Speed differential is divided by this before weighting.
pub const ADVANTAGE_SPEED_SCALE: f64 = 10.0;

// --- Threat score (tactical assessor) ---

/// Contribution when we sit inside the target's weapon range.
pub const THREAT_IN_RANGE_TERM: f64 = 0.5;

/// Contribution when the target closes faster than the closing threshold.
pub const THREAT_CLOSING_TERM: f64 = 0.3;

/// Closing speed (world units/s) above which the closing term applies.
pub const THREAT_CLOSING_SPEED: f64 = 5.0;

// --- Situation classification ---

/// Target health fraction below which the situation is Victory.
pub const VICTORY_HEALTH_FRACTION: f64 = 0.2;

/// Advantage score beyond +/- this threshold is Advantage/Disadvantage.
pub const ADVANTAGE_SCORE_THRESHOLD: f64 = 0.5;

/// Threat score above which the situation is Overwhelmed.
pub const OVERWHELMED_THREAT_THRESHOLD: f64 = 0.7;

// --- Intent rules ---

/// Aggression at or above this picks Pursuit over Strafe when advantaged.
pub const AGGRESSION_PURSUIT_THRESHOLD: f64 = 0.7;

/// Threat score above which a disadvantaged ship evades.
pub const DISADVANTAGE_EVADE_THREAT: f64 = 0.6;

/// Hull fraction below which a disadvantaged ship retreats.
pub const DISADVANTAGE_RETREAT_HULL: f64 = 0.40;

/// Hull fraction below which an overwhelmed ship retreats.
pub const OVERWHELMED_RETREAT_HULL: f64 = 0.30;

/// Distance beyond preferred range + this slack triggers Pursuit when neutral.
pub const NEUTRAL_PURSUIT_SLACK: f64 = 50.0;

// --- Maneuver planner ---

/// Relative bearing beyond which a close-in pursuit flanks instead of
/// closing head-on (degrees).
pub const FLANK_ANGLE_DEG: f64 = 45.0;

/// Lateral jitter applied to the evasion heading (degrees, +/-).
pub const EVADE_JITTER_DEG: f64 = 45.0;

/// Evasion waypoint distance as a multiple of the minimum safe distance.
pub const EVADE_DISTANCE_FACTOR: f64 = 1.5;

/// A locked ship nudges away when closer than preferred range minus this.
pub const LOCKED_CLOSE_TOLERANCE: f64 = 20.0;

/// Distance of the locked back-away nudge.
pub const LOCKED_NUDGE_DISTANCE: f64 = 10.0;

// --- Fire controller ---

/// Maximum firing cone while strafing (degrees, half-angle).
pub const FIRE_ANGLE_STRAFE_DEG: f64 = 30.0;

/// Maximum firing cone under weapon lock (degrees, half-angle).
pub const FIRE_ANGLE_LOCKED_DEG: f64 = 10.0;

/// Maximum firing cone for all other intents (degrees, half-angle).
pub const FIRE_ANGLE_DEFAULT_DEG: f64 = 20.0;

// --- Targeting service ---

/// Base recommended engager count per target.
pub const BASE_ENGAGER_LIMIT: usize = 3;

/// Priority weight applied to threat level.
pub const PRIORITY_THREAT_WEIGHT: f64 = 100.0;

/// Priority weight applied to remaining health fraction.
pub const PRIORITY_HEALTH_WEIGHT: f64 = 50.0;

/// Priority penalty for targets at or over the recommended engager count.
pub const PRIORITY_OVERKILL_PENALTY: f64 = 200.0;

/// Priority bonus for targets that already have at least one engager.
pub const PRIORITY_AVAILABILITY_BONUS: f64 = 10.0;

/// Fleet-DPS-to-armor ratio below which the engager limit escalates by two.
pub const ESCALATION_SEVERE_RATIO: f64 = 0.67;

/// Fleet-DPS-to-armor ratio below which the engager limit escalates by one.
pub const ESCALATION_MINOR_RATIO: f64 = 1.0;

// --- Default combat profile ---

/// Default per-ship aggression (0.0 = defensive, 1.0 = aggressive).
pub const DEFAULT_AGGRESSION: f64 = 0.7;

/// Preferred combat range (world units).
pub const PREFERRED_COMBAT_RANGE: f64 = 150.0;

/// Tolerance band around the preferred range.
pub const PREFERRED_RANGE_TOLERANCE: f64 = 50.0;

/// Minimum safe distance; closer than this reads as dangerous proximity.
pub const MINIMUM_SAFE_DISTANCE: f64 = 80.0;

/// Maximum engagement range; retreats aim this far out.
pub const MAXIMUM_ENGAGEMENT_RANGE: f64 = 300.0;

/// Minimum seconds an intent must hold before it may switch.
pub const INTENT_PERSISTENCE_SECS: f64 = 2.0;

/// Lookahead used for the pursuit intercept prediction (seconds).
pub const INTERCEPT_LOOKAHEAD_SECS: f64 = 0.5;
