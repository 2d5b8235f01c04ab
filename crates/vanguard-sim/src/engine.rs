//! Fleet engine — the core of the decision system.
//!
//! `FleetEngine` owns the hecs ECS world of controlled ships, the
//! targeting service, and fleet command. It consumes a read-only frame of
//! world state each tick and produces a `DecisionSnapshot`. Completely
//! headless, enabling deterministic testing; it never mutates positions,
//! health, or visuals.

use std::collections::{BTreeMap, VecDeque};

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use vanguard_core::commands::FleetCommand;
use vanguard_core::components::{Doctrine, IntentState};
use vanguard_core::config::EngineConfig;
use vanguard_core::enums::{CombatIntent, FleetOrder};
use vanguard_core::events::CombatEvent;
use vanguard_core::observation::FrameInput;
use vanguard_core::state::DecisionSnapshot;
use vanguard_core::types::{ShipId, SimTime};

use crate::command::FleetCommander;
use crate::systems;
use crate::targeting::TargetingService;

/// The fleet combat decision engine. Owns all decision state for one
/// fleet; independent battles each get their own engine instance.
pub struct FleetEngine {
    world: World,
    ships: BTreeMap<ShipId, hecs::Entity>,
    time: SimTime,
    rng: ChaCha8Rng,
    targeting: TargetingService,
    commander: FleetCommander,
    config: EngineConfig,
    command_queue: VecDeque<FleetCommand>,
    events: Vec<CombatEvent>,
}

impl FleetEngine {
    /// Create a new engine with the given config.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            world: World::new(),
            ships: BTreeMap::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            targeting: TargetingService::new(config.base_engager_limit),
            commander: FleetCommander::new(),
            config,
            command_queue: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Queue a fleet command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: FleetCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = FleetCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the engine by one tick against the given frame of world
    /// state and return the resulting decisions.
    pub fn tick(&mut self, frame: &FrameInput) -> DecisionSnapshot {
        self.process_commands();

        systems::roster::run(
            &mut self.world,
            &mut self.ships,
            &mut self.targeting,
            &self.config,
            frame,
            self.time.tick,
            &mut self.events,
        );

        let (effective_order, stale_warning) = self.commander.effective_order(&self.targeting);
        self.events.extend(stale_warning);

        // Repair over-assignment before ships act on it.
        let moves = self.targeting.redistribute_overkill();
        let mut released_per_target: BTreeMap<_, u32> = BTreeMap::new();
        for moved in &moves {
            *released_per_target.entry(moved.from_target).or_default() += 1;
        }
        for (target_id, released) in released_per_target {
            self.events
                .push(CombatEvent::OverkillRedistributed { target_id, released });
        }
        for moved in moves {
            if let Some(target_id) = moved.to_target {
                self.events.push(CombatEvent::AssignmentMade {
                    ship_id: moved.ship_id,
                    target_id,
                });
            }
        }

        let decisions = systems::decision::run(
            &mut self.world,
            &self.ships,
            &mut self.targeting,
            effective_order,
            &self.config,
            &mut self.rng,
            self.time.tick,
            &mut self.events,
        );

        let events = std::mem::take(&mut self.events);
        let snapshot = systems::snapshot::build_snapshot(
            self.time,
            self.commander.order(),
            decisions,
            &self.targeting,
            events,
        );
        self.time.advance();
        snapshot
    }

    /// The fleet order as issued.
    pub fn order(&self) -> FleetOrder {
        self.commander.order()
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Read-only access to the targeting service for telemetry.
    pub fn targeting(&self) -> &TargetingService {
        &self.targeting
    }

    /// Read-only access to fleet command.
    pub fn commander(&self) -> &FleetCommander {
        &self.commander
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single fleet command.
    fn handle_command(&mut self, command: FleetCommand) {
        match command {
            FleetCommand::IssueOrder { order } => {
                self.commander.issue_order(order);
            }
            FleetCommand::ClearOrder => {
                self.commander.clear_order();
            }
            FleetCommand::SetAggression {
                ship_id,
                aggression,
            } => match self.ships.get(&ship_id) {
                Some(&entity) => {
                    if let Ok(mut doctrine) = self.world.get::<&mut Doctrine>(entity) {
                        doctrine.aggression = aggression.clamp(0.0, 1.0);
                    }
                }
                None => warn!(ship_id, "aggression command for unknown ship"),
            },
            FleetCommand::SetWeaponLock { ship_id, locked } => match self.ships.get(&ship_id) {
                Some(&entity) => {
                    if let Ok(mut intent_state) = self.world.get::<&mut IntentState>(entity) {
                        intent_state.weapon_lock = locked;
                        if locked {
                            intent_state.intent = CombatIntent::Locked;
                            intent_state.last_switch_tick = self.time.tick;
                        }
                    }
                }
                None => warn!(ship_id, "weapon lock command for unknown ship"),
            },
        }
    }
}
