//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes session commands,
//! runs all systems once per frame, resolves selections, and produces
//! `FrameSnapshot`s. Completely headless: the renderer and score widget are
//! reached only through the `VisualBackend` and `ScoreDisplay` traits,
//! enabling deterministic testing.
//!
//! Ticks and selections both take `&mut self`, so a selection is applied
//! as one atomic step between ticks and no tick sees it half-done.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use popshot_core::commands::PlayerCommand;
use popshot_core::components::{Particle, Target};
use popshot_core::config::GameConfig;
use popshot_core::constants::DEFAULT_SEED;
use popshot_core::enums::GamePhase;
use popshot_core::events::SimEvent;
use popshot_core::services::{ScoreDisplay, SelectEvent, TargetPicker, VisualBackend};
use popshot_core::state::FrameSnapshot;
use popshot_core::types::{Color, Position, SimTime};

use crate::score::ScoreTracker;
use crate::systems;
use crate::systems::hit_resolver::{HitContext, HitReport};
use crate::systems::spawner::SpawnTimer;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Session tunables.
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    config: GameConfig,
    rng: ChaCha8Rng,
    spawn_timer: SpawnTimer,
    next_target_seq: u64,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    score: ScoreTracker,
    visuals: Box<dyn VisualBackend + Send>,
    display: Box<dyn ScoreDisplay + Send>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config and services.
    pub fn new(
        config: SimConfig,
        visuals: Box<dyn VisualBackend + Send>,
        display: Box<dyn ScoreDisplay + Send>,
    ) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            spawn_timer: SpawnTimer::new(config.game.spawn.interval_ms),
            config: config.game,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_target_seq: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            score: ScoreTracker::default(),
            visuals,
            display,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply a command immediately, after anything already queued.
    ///
    /// Hosts that interleave commands with `on_select` use this so both
    /// take effect in arrival order.
    pub fn apply_command(&mut self, command: PlayerCommand, now_ms: u64) {
        self.process_commands(now_ms);
        self.handle_command(command, now_ms);
    }

    /// Advance the simulation by one frame and return the resulting snapshot.
    ///
    /// `dt_secs` is the frame delta; `now_ms` is the host's monotonic clock,
    /// used only by the spawn timer. Negative deltas are treated as zero.
    pub fn tick(&mut self, dt_secs: f32, now_ms: u64) -> FrameSnapshot {
        self.process_commands(now_ms);

        if self.phase == GamePhase::Active {
            let dt = dt_secs.max(0.0);
            self.run_systems(dt, now_ms);
            self.time.advance(dt, now_ms);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.phase, &self.score, events)
    }

    /// Resolve a selection event against the live targets.
    ///
    /// Destroys at most one target. Ignored unless the session is active.
    pub fn on_select(&mut self, event: &SelectEvent, picker: &dyn TargetPicker) -> Option<HitReport> {
        if self.phase != GamePhase::Active {
            log::debug!("selection from {:?} ignored in {:?}", event.source, self.phase);
            return None;
        }

        let ctx = HitContext {
            world: &mut self.world,
            rng: &mut self.rng,
            visuals: &mut *self.visuals,
            display: &mut *self.display,
            score: &mut self.score,
            events: &mut self.events,
        };
        systems::hit_resolver::resolve(ctx, &self.config, picker, event)
    }

    /// Spawn one random target now, outside the timer.
    pub fn spawn_target(&mut self) -> Entity {
        systems::spawner::spawn_target(
            &mut self.world,
            &mut self.rng,
            &mut *self.visuals,
            &self.config.spawn,
            &mut self.next_target_seq,
            &mut self.events,
        )
    }

    /// Remove a live target and release its visual.
    ///
    /// Panics if `entity` is not a live target.
    pub fn remove_target(&mut self, entity: Entity) {
        systems::cleanup::remove_target(&mut self.world, &mut *self.visuals, entity);
    }

    /// Spawn an explosion of `count` particles. Returns the number spawned.
    pub fn spawn_explosion(&mut self, position: Position, color: Color, count: u32) -> u32 {
        systems::particles::spawn_explosion(
            &mut self.world,
            &mut self.rng,
            &mut *self.visuals,
            &self.config.particles,
            position,
            color,
            count,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get the running score.
    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of live targets.
    pub fn target_count(&self) -> usize {
        self.world.query::<&Target>().iter().count()
    }

    /// Number of live particles.
    pub fn particle_count(&self) -> usize {
        self.world.query::<&Particle>().iter().count()
    }

    /// Spawn a target with fixed kinematics (for scripted tests).
    #[cfg(test)]
    pub fn spawn_target_at(
        &mut self,
        position: Position,
        velocity: popshot_core::types::Velocity,
    ) -> Entity {
        let seq = self.next_target_seq;
        self.next_target_seq += 1;

        let entity = crate::world_setup::spawn_target_at(
            &mut self.world,
            &mut *self.visuals,
            self.config.spawn.target_radius,
            seq,
            position,
            velocity,
            Color::WHITE,
        );
        systems::spawner::record_spawn(&self.world, entity, seq, &mut self.events);
        entity
    }

    /// Process all queued commands.
    fn process_commands(&mut self, now_ms: u64) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, now_ms);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: PlayerCommand, now_ms: u64) {
        match command {
            PlayerCommand::StartSession => {
                if self.phase == GamePhase::Idle {
                    for _ in 0..self.config.spawn.initial_targets {
                        self.spawn_target();
                    }
                    self.score.render(&mut *self.display);
                    self.spawn_timer.restart(now_ms);
                    self.time = SimTime {
                        now_ms,
                        ..SimTime::default()
                    };
                    self.phase = GamePhase::Active;
                    log::info!(
                        "session started at {now_ms} ms with {} targets",
                        self.config.spawn.initial_targets
                    );
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                    log::info!("session paused at frame {}", self.time.frame);
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                    log::info!("session resumed at frame {}", self.time.frame);
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32, now_ms: u64) {
        // 1. Timed spawn (at most one per tick)
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut *self.visuals,
            &self.config.spawn,
            &mut self.spawn_timer,
            &mut self.next_target_seq,
            &mut self.events,
            now_ms,
        );
        // 2. Target movement
        systems::movement::run(&mut self.world, dt);
        // 3. Out-of-bounds culling
        systems::cleanup::run(
            &mut self.world,
            &mut *self.visuals,
            &self.config.bounds,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 4. Particle decay, motion, expiry
        systems::particles::run(
            &mut self.world,
            &mut *self.visuals,
            &self.config.particles,
            dt,
            &mut self.despawn_buffer,
            &mut self.events,
        );
    }
}
