//! Simulation engine: the headless host for one BatteryCollector level.
//!
//! `SimulationEngine` owns the hecs world, processes player commands, runs
//! all systems, and produces `HudSnapshot`s. It plays the part of the host
//! engine for the game's own entities: it performs the level-start
//! lifecycle, resolves the player handle each frame, and feeds the
//! `GameStateController`. Completely headless, enabling deterministic
//! testing.

use std::collections::VecDeque;

use anyhow::Result;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use battery_core::commands::PlayerCommand;
use battery_core::components::{PlayerControl, PowerLevel, SpawnVolume};
use battery_core::enums::PlayState;
use battery_core::events::GameEvent;
use battery_core::state::HudSnapshot;
use battery_core::types::{DVec3, SimTime};

use crate::config::SimConfig;
use crate::controller::GameStateController;
use crate::systems;
use crate::systems::game_state::WorldEffects;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    config: SimConfig,
    controller: GameStateController<Entity>,
    player: Option<Entity>,
    started: bool,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new engine. The level is empty until `begin_play`.
    /// Fails if the config does not validate.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            controller: GameStateController::new(config.decay_rate),
            config,
            player: None,
            started: false,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Level start: spawn the player and spawn volumes, discover the volumes
    /// through a world query, and enter `Playing`. Calling it again is a
    /// no-op.
    pub fn begin_play(&mut self) {
        if self.started {
            log::warn!("begin_play called twice; ignoring");
            return;
        }
        self.started = true;

        let player = world_setup::setup_level(&mut self.world, &mut self.rng, &self.config);
        self.player = Some(player);

        let spawners = self.discover_spawn_volumes();
        let initial_power = self
            .world
            .get::<&PowerLevel>(player)
            .map(|power| power.initial)
            .unwrap_or(self.config.initial_power);

        let mut effects = WorldEffects::new(&mut self.world, self.player);
        let transition = self
            .controller
            .initialize(initial_power, spawners, &mut effects);
        let applied = effects.spawners_applied;
        if let Some(transition) = transition {
            systems::game_state::record_transition(transition, applied, &mut self.events);
        }
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the level by one frame of `dt` seconds and return the HUD
    /// snapshot. Negative deltas are treated as zero.
    pub fn tick(&mut self, dt: f64) -> HudSnapshot {
        let dt = dt.max(0.0);
        let player = self.player();

        self.process_commands(player, dt);

        if self.started {
            self.run_systems(player, dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.controller, player, events)
    }

    /// Current play state.
    pub fn state(&self) -> PlayState {
        self.controller.current_state()
    }

    /// Power needed to win, fixed at level start.
    pub fn power_to_win(&self) -> f64 {
        self.controller.power_to_win()
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn controller(&self) -> &GameStateController<Entity> {
        &self.controller
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The player entity, if it is still alive.
    pub fn player(&self) -> Option<Entity> {
        self.player.filter(|&p| self.world.contains(p))
    }

    /// Current power of the player, if it is still alive.
    pub fn player_power(&self) -> Option<f64> {
        systems::game_state::resolve_power(&self.world, self.player)
    }

    /// Overwrite the player's current power. Returns false if the player is
    /// gone.
    pub fn set_player_power(&mut self, current: f64) -> bool {
        let Some(player) = self.player() else {
            return false;
        };
        match self.world.get::<&mut PowerLevel>(player) {
            Ok(mut power) => {
                power.current = current;
                true
            }
            Err(_) => false,
        }
    }

    /// Destroy the player character, as the host does when the pawn dies or
    /// is unpossessed. The state machine pauses until a player exists again.
    pub fn despawn_player(&mut self) -> bool {
        match self.player.take() {
            Some(player) => self.world.despawn(player).is_ok(),
            None => false,
        }
    }

    /// Destroy one spawn volume. Its registry handle goes stale.
    pub fn despawn_spawn_volume(&mut self, volume: Entity) -> bool {
        let is_volume = self.world.get::<&SpawnVolume>(volume).is_ok();
        is_volume && self.world.despawn(volume).is_ok()
    }

    /// Place an active battery at an exact position.
    pub fn place_battery(&mut self, position: DVec3) -> Entity {
        world_setup::spawn_battery(&mut self.world, position, self.config.battery_power)
    }

    /// Spawn volumes registered with the controller, in discovery order.
    pub fn spawn_volumes(&self) -> &[Entity] {
        self.controller.spawners().handles()
    }

    fn discover_spawn_volumes(&self) -> Vec<Entity> {
        let mut volumes: Vec<Entity> = self
            .world
            .query::<&SpawnVolume>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        volumes.sort_by_key(|entity| entity.id());
        volumes
    }

    /// Process all queued commands. Commands are dropped while the player is
    /// absent or its input is frozen.
    fn process_commands(&mut self, player: Option<Entity>, dt: f64) {
        while let Some(command) = self.command_queue.pop_front() {
            let Some(player) = player else {
                continue;
            };
            if !self.input_enabled(player) {
                log::debug!("input frozen; dropping {command:?}");
                continue;
            }
            self.handle_command(player, command, dt);
        }
    }

    fn input_enabled(&self, player: Entity) -> bool {
        self.world
            .get::<&PlayerControl>(player)
            .map(|control| control.input_enabled)
            .unwrap_or(false)
    }

    /// Handle a single player command.
    fn handle_command(&mut self, player: Entity, command: PlayerCommand, dt: f64) {
        match command {
            PlayerCommand::Collect => {
                systems::collection::run(
                    &mut self.world,
                    player,
                    self.config.collection_radius,
                    &mut self.events,
                );
            }
            PlayerCommand::Walk { direction } => {
                systems::locomotion::walk(&mut self.world, player, direction, dt);
            }
            PlayerCommand::Jump => {
                systems::locomotion::jump(&mut self.world, player);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, player: Option<Entity>, dt: f64) {
        // 1. Spawn volumes drop batteries
        systems::pickup_spawner::run(
            &mut self.world,
            &mut self.rng,
            dt,
            self.config.battery_power,
            &mut self.events,
        );
        // 2. Win/lose state machine and power decay
        systems::game_state::run(
            &mut self.world,
            &mut self.controller,
            player,
            dt,
            &mut self.events,
        );
        // 3. Cleanup (collected pickups)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}
