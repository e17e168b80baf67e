//! Session configuration.
//!
//! Every field defaults to the matching value in `constants.rs`, so a config
//! file only needs the keys it overrides. Values are fixed for a session.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Errors raised while loading or validating a configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for `GameConfig`.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The config parsed but a value is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// All tunables for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub spawn: SpawnConfig,
    pub bounds: BoundsConfig,
    pub particles: ParticleConfig,
    pub scoring: ScoringConfig,
}

/// Where, how often, and how fast targets appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub interval_ms: u64,
    pub area_width: f32,
    pub area_height: f32,
    pub center_y: f32,
    pub depth: f32,
    pub depth_jitter: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    pub target_radius: f32,
    pub initial_targets: u32,
}

/// World bounds past which a target is culled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    pub max_abs_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

/// Explosion burst parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: u32,
    pub lifetime_secs: f32,
    pub speed: f32,
    pub size: f32,
    pub decay: ParticleDecay,
}

/// How particle scale shrinks over time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum ParticleDecay {
    /// `scale *= factor` once per tick. Shrink speed depends on frame rate.
    PerTick { factor: f32 },
    /// `scale *= factor^(dt * reference_fps)`. Matches `PerTick` at
    /// `reference_fps` and is independent of the actual frame rate.
    PerSecond { factor: f32, reference_fps: f32 },
}

/// Points per hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub points_per_hit: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval_ms: SPAWN_INTERVAL_MS,
            area_width: GAME_AREA_WIDTH,
            area_height: GAME_AREA_HEIGHT,
            center_y: SPAWN_CENTER_Y,
            depth: GAME_DEPTH,
            depth_jitter: DEPTH_JITTER,
            speed_x: TARGET_SPEED_X,
            speed_y: TARGET_SPEED_Y,
            target_radius: TARGET_RADIUS,
            initial_targets: INITIAL_TARGETS,
        }
    }
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            max_abs_x: CULL_MAX_ABS_X,
            min_y: CULL_MIN_Y,
            max_y: CULL_MAX_Y,
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            lifetime_secs: PARTICLE_LIFETIME_SECS,
            speed: PARTICLE_SPEED,
            size: PARTICLE_SIZE,
            decay: ParticleDecay::default(),
        }
    }
}

impl Default for ParticleDecay {
    fn default() -> Self {
        Self::PerTick {
            factor: PARTICLE_SHRINK_FACTOR,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_per_hit: SCORE_PER_HIT,
        }
    }
}

impl ParticleDecay {
    /// Scale multiplier for one tick of `dt` seconds.
    pub fn multiplier(&self, dt: f32) -> f32 {
        match *self {
            ParticleDecay::PerTick { factor } => factor,
            ParticleDecay::PerSecond {
                factor,
                reference_fps,
            } => factor.powf(dt * reference_fps),
        }
    }
}

impl BoundsConfig {
    /// True when `position` is outside the world and must be culled.
    pub fn is_outside(&self, x: f32, y: f32) -> bool {
        x.abs() > self.max_abs_x || y < self.min_y || y > self.max_y
    }
}

impl GameConfig {
    /// Parse from JSON. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let spawn = &self.spawn;
        if spawn.interval_ms == 0 {
            return Err(invalid("spawn.interval_ms must be positive"));
        }
        if !(spawn.area_width > 0.0 && spawn.area_height > 0.0) {
            return Err(invalid("spawn area must have positive width and height"));
        }
        if spawn.depth_jitter < 0.0 || spawn.speed_x < 0.0 || spawn.speed_y < 0.0 {
            return Err(invalid("spawn jitter and speed ranges must not be negative"));
        }
        if spawn.target_radius <= 0.0 {
            return Err(invalid("spawn.target_radius must be positive"));
        }

        let bounds = &self.bounds;
        if bounds.max_abs_x <= 0.0 || bounds.min_y >= bounds.max_y {
            return Err(invalid("culling bounds are empty"));
        }

        let particles = &self.particles;
        if particles.count == 0 {
            return Err(invalid("particles.count must be positive"));
        }
        if particles.lifetime_secs <= 0.0 || particles.size <= 0.0 {
            return Err(invalid("particle lifetime and size must be positive"));
        }
        if particles.speed < 0.0 {
            return Err(invalid("particles.speed must not be negative"));
        }
        let factor = match particles.decay {
            ParticleDecay::PerTick { factor } => factor,
            ParticleDecay::PerSecond {
                factor,
                reference_fps,
            } => {
                if reference_fps <= 0.0 {
                    return Err(invalid("particles.decay.reference_fps must be positive"));
                }
                factor
            }
        };
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(invalid("particles.decay.factor must be in (0, 1]"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}
