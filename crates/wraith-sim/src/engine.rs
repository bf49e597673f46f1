//! Simulation engine: the headless host for agent controllers.
//!
//! `SimulationEngine` owns the hecs ECS world, processes host commands,
//! runs all systems, and produces `SimSnapshot`s. Same seed and same
//! command stream give the same snapshots.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use wraith_core::commands::SimCommand;
use wraith_core::enums::{ScenarioId, TriggerOverride};
use wraith_core::events::{AgentEvent, SimEvent};
use wraith_core::state::SimSnapshot;
use wraith_core::types::SimTime;

use crate::components::{Ghost, Position, ScriptedPath, Target, Velocity};
use crate::error::SimError;
use crate::scenario::{self, Scenario};
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    paused: bool,
    rng: ChaCha8Rng,
    command_queue: VecDeque<SimCommand>,
    events: Vec<SimEvent>,
    target_caught: bool,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            paused: false,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            target_caught: false,
        }
    }

    /// Replace the world with `scenario` and restart the clock.
    ///
    /// On error the previous world is left untouched.
    pub fn load_scenario(&mut self, scenario: &Scenario) -> Result<(), SimError> {
        scenario.validate()?;
        let mut world = World::new();
        world_setup::setup_scenario(&mut world, scenario)?;

        log::info!(
            "loaded scenario {:?}: {} agents, {} obstacles",
            scenario.name,
            scenario.agents.len(),
            scenario.obstacles.len()
        );
        self.world = world;
        self.time = SimTime::default();
        self.paused = false;
        self.command_queue.clear();
        self.events.clear();
        self.target_caught = false;
        Ok(())
    }

    /// Load a built-in scenario. `RandomPatrol` draws its layout from the
    /// engine's seeded RNG.
    pub fn load_builtin(&mut self, id: ScenarioId) -> Result<(), SimError> {
        let scenario = scenario::build(id, &mut self.rng);
        self.load_scenario(&scenario)
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();

        if !self.paused {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.paused,
            events,
            self.target_caught,
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Has any agent caught the target since the scenario was loaded?
    pub fn target_caught(&self) -> bool {
        self.target_caught
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::SetTargetPosition { position } => {
                let mut moved = false;
                for (_entity, (_target, pos)) in self.world.query_mut::<(&Target, &mut Position)>() {
                    pos.0 = position;
                    moved = true;
                }
                if !moved {
                    log::warn!("SetTargetPosition ignored: no target in the world");
                }
            }
            SimCommand::SetTargetVelocity { velocity } => {
                let mut scripted = Vec::new();
                for (entity, (_target, vel, path)) in self
                    .world
                    .query_mut::<(&Target, &mut Velocity, Option<&ScriptedPath>)>()
                {
                    vel.0 = velocity;
                    if path.is_some() {
                        scripted.push(entity);
                    }
                }
                // The entities came from the query above, so removal only fails
                // if the world changed in between.
                for entity in scripted {
                    if let Err(err) = self.world.remove_one::<ScriptedPath>(entity) {
                        log::warn!("SetTargetVelocity could not drop scripted path: {err}");
                    }
                }
            }
            SimCommand::TriggerEnter { agent } => {
                let ghost = self
                    .world
                    .query_mut::<&mut Ghost>()
                    .into_iter()
                    .find(|(_, ghost)| ghost.tag == agent);
                match ghost {
                    Some((_, ghost)) => ghost.trigger = TriggerOverride::Entered,
                    None => log::warn!("TriggerEnter ignored: no agent tagged {agent}"),
                }
            }
            SimCommand::Pause => self.paused = true,
            SimCommand::Resume => self.paused = false,
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.time.dt();
        // 1. Target motion
        systems::target_motion::run(&mut self.world, dt);
        // 2. Trigger volumes
        systems::triggers::run(&mut self.world);
        // 3. Agent controllers
        let first_new = self.events.len();
        systems::ghost_ai::run(&mut self.world, &self.time, &mut self.events);
        // 4. Navigation
        systems::navigation::run(&mut self.world, dt);

        if self.events[first_new..]
            .iter()
            .any(|e| matches!(e.event, AgentEvent::TargetCaught { .. }))
        {
            self.target_caught = true;
        }
    }
}
