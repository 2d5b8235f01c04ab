//! Targeting service — the target book and engager accounting.
//!
//! Assigns ships to targets under a dynamic capacity rule, escalating the
//! per-target engager limit when the fleet cannot out-damage a target's
//! armor, and repairs overkill by releasing excess engagers.
//!
//! All maps are ordered so that scans and tie-breaks are deterministic:
//! identical inputs always produce identical ship-to-target mappings.

use std::collections::BTreeMap;

use tracing::{debug, info};

use vanguard_core::constants::*;
use vanguard_core::enums::TargetStatus;
use vanguard_core::state::TargetingView;
use vanguard_core::types::{Position, ShipId, TargetId, Velocity};

use crate::error::TargetingError;

/// A tracked enemy target with engagement accounting.
#[derive(Debug, Clone)]
pub struct TargetRecord {
    pub id: TargetId,
    pub position: Position,
    pub velocity: Velocity,
    /// Flat damage-reduction stat; drives escalation.
    pub armor: f64,
    /// Remaining health fraction (0..1).
    pub health_fraction: f64,
    /// Shield strength fraction (0..1).
    pub shield_frac: f64,
    /// The target's own weapon range, for threat assessment.
    pub weapon_range: f64,
    /// Assessed threat level (0..1).
    pub threat_level: f64,
    /// Ships assigned to this target, oldest assignment first.
    pub assigned_engagers: Vec<ShipId>,
    /// Base recommended engager count.
    pub max_recommended_engagers: usize,
    pub status: TargetStatus,
}

impl TargetRecord {
    /// Assignment priority; higher is more important. Targets at or over
    /// the recommended engager count are penalized heavily, targets that
    /// already have an engager get a small concentration bonus.
    pub fn priority_score(&self) -> f64 {
        let mut score = self.threat_level * PRIORITY_THREAT_WEIGHT
            + self.health_fraction * PRIORITY_HEALTH_WEIGHT;
        if self.assigned_engagers.len() >= self.max_recommended_engagers {
            score -= PRIORITY_OVERKILL_PENALTY;
        }
        if !self.assigned_engagers.is_empty() {
            score += PRIORITY_AVAILABILITY_BONUS;
        }
        score
    }

    fn refresh_status(&mut self) {
        self.status = if self.health_fraction <= 0.0 {
            TargetStatus::Destroyed
        } else if self.assigned_engagers.len() >= self.max_recommended_engagers {
            TargetStatus::OverkillRisk
        } else if !self.assigned_engagers.is_empty() {
            TargetStatus::Engaged
        } else {
            TargetStatus::Available
        };
    }
}

/// One ship moved off an over-assigned target.
#[derive(Debug, Clone)]
pub struct Redistribution {
    pub ship_id: ShipId,
    pub from_target: TargetId,
    /// None when no other target could accept the ship.
    pub to_target: Option<TargetId>,
}

/// Owns the set of known targets and all ship-to-target assignments.
#[derive(Debug, Clone)]
pub struct TargetingService {
    targets: BTreeMap<TargetId, TargetRecord>,
    /// ship -> target; a ship holds at most one assignment.
    assignments: BTreeMap<ShipId, TargetId>,
    base_limit: usize,
    fleet_dps: f64,
}

impl TargetingService {
    pub fn new(base_limit: usize) -> Self {
        Self {
            targets: BTreeMap::new(),
            assignments: BTreeMap::new(),
            base_limit,
            fleet_dps: 0.0,
        }
    }

    /// Add a target, or refresh the core stats of a known one.
    /// Existing engager accounting is preserved on refresh.
    pub fn add_target(
        &mut self,
        id: TargetId,
        position: Position,
        armor: f64,
        health_fraction: f64,
        threat_level: f64,
    ) {
        let base_limit = self.base_limit;
        let record = self.targets.entry(id).or_insert_with(|| TargetRecord {
            id,
            position,
            velocity: Velocity::default(),
            armor,
            health_fraction,
            shield_frac: 0.0,
            weapon_range: 0.0,
            threat_level,
            assigned_engagers: Vec::new(),
            max_recommended_engagers: base_limit,
            status: TargetStatus::Available,
        });
        record.position = position;
        record.armor = armor;
        record.health_fraction = health_fraction.clamp(0.0, 1.0);
        record.threat_level = threat_level.clamp(0.0, 1.0);
        record.refresh_status();
        debug!(target_id = id, armor, threat_level, "target tracked");
    }

    /// Refresh a target's kinematic and defensive mirror.
    pub fn update_kinematics(
        &mut self,
        id: TargetId,
        position: Position,
        velocity: Velocity,
        shield_frac: f64,
        weapon_range: f64,
    ) -> Result<(), TargetingError> {
        let record = self
            .targets
            .get_mut(&id)
            .ok_or(TargetingError::UnknownTarget(id))?;
        record.position = position;
        record.velocity = velocity;
        record.shield_frac = shield_frac;
        record.weapon_range = weapon_range;
        Ok(())
    }

    /// Update a target's health. Reaching zero destroys the target and
    /// releases every engager; the released ships are returned so the
    /// caller can reassign them.
    pub fn update_health(
        &mut self,
        id: TargetId,
        new_fraction: f64,
    ) -> Result<Vec<ShipId>, TargetingError> {
        let record = self
            .targets
            .get_mut(&id)
            .ok_or(TargetingError::UnknownTarget(id))?;
        record.health_fraction = new_fraction.clamp(0.0, 1.0);
        record.refresh_status();
        if record.status == TargetStatus::Destroyed {
            let released = self.release_engagers(id);
            info!(target_id = id, released = released.len(), "target destroyed");
            return Ok(released);
        }
        Ok(Vec::new())
    }

    /// Drop a target from the book (it left the simulation), releasing
    /// all its engagers.
    pub fn remove_target(&mut self, id: TargetId) -> Result<Vec<ShipId>, TargetingError> {
        if !self.targets.contains_key(&id) {
            return Err(TargetingError::UnknownTarget(id));
        }
        let released = self.release_engagers(id);
        self.targets.remove(&id);
        debug!(target_id = id, "target removed");
        Ok(released)
    }

    /// Assign a ship to the best target. Any prior assignment is released
    /// first; a ship holds at most one assignment. A preferred target is
    /// honored only when it is alive and has spare dynamic capacity,
    /// otherwise selection falls back to the priority scan. Returns None
    /// when no target can accept the ship.
    pub fn assign_ship(&mut self, ship_id: ShipId, preferred: Option<TargetId>) -> Option<TargetId> {
        self.release_ship(ship_id);

        if let Some(pref) = preferred {
            if self.can_accept(pref) {
                self.make_assignment(ship_id, pref);
                return Some(pref);
            }
        }

        let best = self.scan_best();
        if let Some(target_id) = best {
            self.make_assignment(ship_id, target_id);
        }
        best
    }

    /// Release a ship's assignment, returning the target it was on.
    pub fn release_ship(&mut self, ship_id: ShipId) -> Option<TargetId> {
        let target_id = self.assignments.remove(&ship_id)?;
        if let Some(record) = self.targets.get_mut(&target_id) {
            record.assigned_engagers.retain(|s| *s != ship_id);
            record.refresh_status();
        }
        debug!(ship_id, target_id, "assignment released");
        Some(target_id)
    }

    /// Can this target accept one more engager right now?
    pub fn can_accept(&self, id: TargetId) -> bool {
        match self.targets.get(&id) {
            Some(record) => {
                record.health_fraction > 0.0
                    && record.assigned_engagers.len() < self.dynamic_limit(record)
            }
            None => false,
        }
    }

    /// Engager capacity with escalation: when the fleet's damage output
    /// cannot out-pace the target's armor, the limit rises so a stalemate
    /// cannot form.
    pub fn dynamic_limit(&self, record: &TargetRecord) -> usize {
        let mut limit = record.max_recommended_engagers;
        if self.fleet_dps > 0.0 {
            let ratio = self.fleet_dps / record.armor.max(DISTANCE_EPSILON);
            if ratio < ESCALATION_SEVERE_RATIO {
                limit += 2;
            } else if ratio < ESCALATION_MINOR_RATIO {
                limit += 1;
            }
        }
        limit
    }

    /// Release excess engagers from every over-assigned target, oldest
    /// assignment first, and try to place each released ship elsewhere.
    pub fn redistribute_overkill(&mut self) -> Vec<Redistribution> {
        let over: Vec<(TargetId, usize)> = self
            .targets
            .values()
            .filter_map(|record| {
                let limit = self.dynamic_limit(record);
                let len = record.assigned_engagers.len();
                (len > limit).then(|| (record.id, len - limit))
            })
            .collect();

        let mut moves = Vec::new();
        for (target_id, excess) in over {
            let released: Vec<ShipId> = match self.targets.get(&target_id) {
                Some(record) => record.assigned_engagers[..excess].to_vec(),
                None => continue,
            };
            for ship_id in released {
                let to_target = self.assign_ship(ship_id, None);
                moves.push(Redistribution {
                    ship_id,
                    from_target: target_id,
                    to_target,
                });
            }
            info!(target_id, excess, "overkill redistributed");
        }
        moves
    }

    /// Fleet damage-per-second estimate used for escalation.
    pub fn set_fleet_dps(&mut self, fleet_dps: f64) {
        self.fleet_dps = fleet_dps.max(0.0);
    }

    pub fn fleet_dps(&self) -> f64 {
        self.fleet_dps
    }

    /// Current target of a ship, if any.
    pub fn ship_target(&self, ship_id: ShipId) -> Option<TargetId> {
        self.assignments.get(&ship_id).copied()
    }

    /// Ships assigned to a target, oldest first.
    pub fn target_engagers(&self, id: TargetId) -> &[ShipId] {
        self.targets
            .get(&id)
            .map(|r| r.assigned_engagers.as_slice())
            .unwrap_or(&[])
    }

    pub fn target(&self, id: TargetId) -> Option<&TargetRecord> {
        self.targets.get(&id)
    }

    pub fn targets(&self) -> impl Iterator<Item = &TargetRecord> {
        self.targets.values()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Release every assignment (between engagements / test fixtures).
    pub fn clear_assignments(&mut self) {
        self.assignments.clear();
        for record in self.targets.values_mut() {
            record.assigned_engagers.clear();
            record.refresh_status();
        }
        info!("all targeting assignments cleared");
    }

    /// Status summary for monitoring.
    pub fn summary(&self) -> TargetingView {
        let mut view = TargetingView {
            total_targets: self.targets.len() as u32,
            assigned_ships: self.assignments.len() as u32,
            fleet_dps: self.fleet_dps,
            ..Default::default()
        };
        for record in self.targets.values() {
            match record.status {
                TargetStatus::Available => view.available += 1,
                TargetStatus::Engaged => view.engaged += 1,
                TargetStatus::OverkillRisk => view.overkill_risk += 1,
                TargetStatus::Destroyed => view.destroyed += 1,
            }
        }
        view
    }

    /// Best target by priority; ties break to the fewest current engagers,
    /// then to the lowest target id. The ordered scan makes the result
    /// reproducible for identical inputs.
    fn scan_best(&self) -> Option<TargetId> {
        let mut best: Option<(TargetId, f64, usize)> = None;
        for record in self.targets.values() {
            if !self.can_accept(record.id) {
                continue;
            }
            let score = record.priority_score();
            let engagers = record.assigned_engagers.len();
            let better = match best {
                None => true,
                Some((_, best_score, best_engagers)) => {
                    score > best_score || (score == best_score && engagers < best_engagers)
                }
            };
            if better {
                best = Some((record.id, score, engagers));
            }
        }
        best.map(|(id, _, _)| id)
    }

    fn make_assignment(&mut self, ship_id: ShipId, target_id: TargetId) {
        self.assignments.insert(ship_id, target_id);
        if let Some(record) = self.targets.get_mut(&target_id) {
            record.assigned_engagers.push(ship_id);
            record.refresh_status();
        }
        debug!(ship_id, target_id, "assignment made");
    }

    fn release_engagers(&mut self, target_id: TargetId) -> Vec<ShipId> {
        let released = match self.targets.get_mut(&target_id) {
            Some(record) => {
                let ships = std::mem::take(&mut record.assigned_engagers);
                record.refresh_status();
                ships
            }
            None => Vec::new(),
        };
        for ship_id in &released {
            self.assignments.remove(ship_id);
        }
        released
    }
}
