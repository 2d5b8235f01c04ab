//! Combat intent controller — rule table plus hysteresis gate.
//!
//! Each tactical situation maps to one small pure rule function, so every
//! rule can be unit-tested in isolation and the dwell-time gate can be
//! tested independently of the rule logic.

use vanguard_core::config::CombatProfile;
use vanguard_core::constants::*;
use vanguard_core::enums::{CombatIntent, TacticalSituation};

use crate::assessor::TacticalPosition;

/// Inputs available to an intent rule.
pub struct RuleInputs<'a> {
    pub tactical: &'a TacticalPosition,
    pub own_hull_frac: f64,
    pub aggression: f64,
    pub profile: &'a CombatProfile,
}

/// A posture rule for one tactical situation.
pub type IntentRule = fn(&RuleInputs) -> CombatIntent;

/// Look up the rule for a situation.
pub fn rule_for(situation: TacticalSituation) -> IntentRule {
    match situation {
        TacticalSituation::Victory => victory_rule,
        TacticalSituation::Advantage => advantage_rule,
        TacticalSituation::Disadvantage => disadvantage_rule,
        TacticalSituation::Overwhelmed => overwhelmed_rule,
        TacticalSituation::Neutral => neutral_rule,
    }
}

/// Enemy nearly defeated — press the attack.
fn victory_rule(_inputs: &RuleInputs) -> CombatIntent {
    CombatIntent::Pursuit
}

/// Advantaged — aggressive ships pursue, others hold the range band.
fn advantage_rule(inputs: &RuleInputs) -> CombatIntent {
    if inputs.aggression >= AGGRESSION_PURSUIT_THRESHOLD {
        CombatIntent::Pursuit
    } else if inputs.tactical.is_within_preferred_range(inputs.profile) {
        CombatIntent::Strafe
    } else {
        CombatIntent::Pursuit
    }
}

/// Disadvantaged — evade under pressure, retreat on a weak hull,
/// otherwise keep fighting at range.
fn disadvantage_rule(inputs: &RuleInputs) -> CombatIntent {
    if inputs.tactical.threat_score > DISADVANTAGE_EVADE_THREAT {
        CombatIntent::Evade
    } else if inputs.own_hull_frac < DISADVANTAGE_RETREAT_HULL {
        CombatIntent::Retreat
    } else {
        CombatIntent::Strafe
    }
}

/// Overwhelmed — defensive only.
fn overwhelmed_rule(inputs: &RuleInputs) -> CombatIntent {
    if inputs.own_hull_frac < OVERWHELMED_RETREAT_HULL {
        CombatIntent::Retreat
    } else {
        CombatIntent::Evade
    }
}

/// Even match — close if far, open if dangerously near, otherwise orbit.
fn neutral_rule(inputs: &RuleInputs) -> CombatIntent {
    let tactical = inputs.tactical;
    if tactical.distance > inputs.profile.preferred_range + NEUTRAL_PURSUIT_SLACK {
        CombatIntent::Pursuit
    } else if tactical.is_dangerously_close(inputs.profile) {
        CombatIntent::Evade
    } else {
        CombatIntent::Strafe
    }
}

/// Input to the intent controller for a single ship.
pub struct IntentContext<'a> {
    pub current: CombatIntent,
    /// Seconds since the current intent was adopted.
    pub elapsed_since_switch_secs: f64,
    /// Externally ordered weapon lock; overrides the rule table.
    pub weapon_lock: bool,
    pub situation: TacticalSituation,
    pub tactical: &'a TacticalPosition,
    pub own_hull_frac: f64,
    pub aggression: f64,
    pub profile: &'a CombatProfile,
}

/// Output from the intent controller.
pub struct IntentUpdate {
    pub new_intent: CombatIntent,
    pub changed: bool,
}

/// Evaluate the controller for one ship.
///
/// The hysteresis gate holds the current intent until the persistence
/// window has elapsed, even if the rule table would choose differently.
pub fn evaluate(ctx: &IntentContext) -> IntentUpdate {
    if ctx.weapon_lock {
        return IntentUpdate {
            new_intent: CombatIntent::Locked,
            changed: ctx.current != CombatIntent::Locked,
        };
    }

    if ctx.elapsed_since_switch_secs < ctx.profile.intent_persistence_secs {
        return IntentUpdate {
            new_intent: ctx.current,
            changed: false,
        };
    }

    let inputs = RuleInputs {
        tactical: ctx.tactical,
        own_hull_frac: ctx.own_hull_frac,
        aggression: ctx.aggression,
        profile: ctx.profile,
    };
    let chosen = rule_for(ctx.situation)(&inputs);

    IntentUpdate {
        new_intent: chosen,
        changed: chosen != ctx.current,
    }
}
