//! Engine and per-ship configuration.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::FactionId;

/// Configuration for constructing a fleet engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// RNG seed for determinism. Same seed + same inputs = same decisions.
    pub seed: u64,
    /// Faction whose ships this engine controls.
    pub controlled_faction: FactionId,
    /// Base recommended engager count per target.
    pub base_engager_limit: usize,
    /// Default combat profile applied to every controlled ship.
    pub profile: CombatProfile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            controlled_faction: 0,
            base_engager_limit: BASE_ENGAGER_LIMIT,
            profile: CombatProfile::default(),
        }
    }
}

/// Fixed behavior weights for the assessor, intent rules, and maneuver
/// planner. Weights are configuration, not learned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CombatProfile {
    /// 0.0 = defensive, 1.0 = aggressive.
    pub aggression: f64,
    /// Preferred combat range (world units).
    pub preferred_range: f64,
    /// Tolerance band around the preferred range.
    pub range_tolerance: f64,
    /// Minimum safe distance.
    pub min_safe_distance: f64,
    /// Maximum engagement range.
    pub max_engagement_range: f64,
    /// Minimum seconds an intent must hold before switching.
    pub intent_persistence_secs: f64,
    /// Pursuit intercept prediction lookahead (seconds).
    pub intercept_lookahead_secs: f64,
}

impl Default for CombatProfile {
    fn default() -> Self {
        Self {
            aggression: DEFAULT_AGGRESSION,
            preferred_range: PREFERRED_COMBAT_RANGE,
            range_tolerance: PREFERRED_RANGE_TOLERANCE,
            min_safe_distance: MINIMUM_SAFE_DISTANCE,
            max_engagement_range: MAXIMUM_ENGAGEMENT_RANGE,
            intent_persistence_secs: INTENT_PERSISTENCE_SECS,
            intercept_lookahead_secs: INTERCEPT_LOOKAHEAD_SECS,
        }
    }
}
