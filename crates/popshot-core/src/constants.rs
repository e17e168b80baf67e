//! Simulation constants and tuning parameters.
//!
//! These are the compile-time defaults behind `GameConfig::default()`.
//! World units are meters; the player stands at the origin looking down -z.

// --- Spawning ---

/// Milliseconds between timed target spawns.
pub const SPAWN_INTERVAL_MS: u64 = 1000;

/// Width of the spawn area (x extent, centered on 0).
pub const GAME_AREA_WIDTH: f32 = 4.0;

/// Height of the spawn area (y extent, centered on `SPAWN_CENTER_Y`).
pub const GAME_AREA_HEIGHT: f32 = 2.0;

/// Vertical center of the spawn area.
pub const SPAWN_CENTER_Y: f32 = 1.0;

/// Depth plane targets spawn around.
pub const GAME_DEPTH: f32 = -3.0;

/// Total depth variation around `GAME_DEPTH` (spawn z is within ±half of this).
pub const DEPTH_JITTER: f32 = 1.0;

/// Full range of the horizontal drift speed (vx is within ±half of this).
pub const TARGET_SPEED_X: f32 = 1.0;

/// Full range of the vertical drift speed (vy is within ±half of this).
pub const TARGET_SPEED_Y: f32 = 0.5;

/// Radius of a target sphere.
pub const TARGET_RADIUS: f32 = 0.2;

/// Targets present when a session starts.
pub const INITIAL_TARGETS: u32 = 1;

// --- Culling bounds ---

/// Targets with |x| beyond this are removed.
pub const CULL_MAX_ABS_X: f32 = 3.0;

/// Targets below this height are removed.
pub const CULL_MIN_Y: f32 = 0.0;

/// Targets above this height are removed.
pub const CULL_MAX_Y: f32 = 4.0;

// --- Particles ---

/// Particles per explosion burst.
pub const PARTICLE_COUNT: u32 = 10;

/// Particle lifetime in seconds.
pub const PARTICLE_LIFETIME_SECS: f32 = 0.5;

/// Full range of each particle velocity component (within ±half of this).
pub const PARTICLE_SPEED: f32 = 2.0;

/// Edge length of a particle cube.
pub const PARTICLE_SIZE: f32 = 0.05;

/// Multiplicative scale decay applied to live particles.
pub const PARTICLE_SHRINK_FACTOR: f32 = 0.95;

/// Frame rate the per-second decay variant is normalised against.
pub const PARTICLE_REFERENCE_FPS: f32 = 60.0;

// --- Scoring ---

/// Points awarded for destroying a target.
pub const SCORE_PER_HIT: u64 = 10;

/// Prefix of the text pushed to the score widget.
pub const SCORE_TEXT_PREFIX: &str = "Score: ";

// --- Host ---

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

/// Frame rate of the reference frame driver (Hz).
pub const FRAME_RATE: u32 = 60;
