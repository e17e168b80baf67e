//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.
//! `Position`, `Velocity`, `Color` and `VisualHandle` from `types.rs`
//! are attached as components as well.

use serde::{Deserialize, Serialize};

/// Marks an entity as a live target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Spawn sequence number. Strictly increasing across a session,
    /// so sorting by it recovers spawn order.
    pub seq: u64,
}

/// Explosion fragment state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Remaining life in seconds. Always in `(0, max_life]` while live.
    pub life: f32,
    /// Life at spawn; used for the fade ratio.
    pub max_life: f32,
}

/// Uniform visual scale (1.0 = as spawned).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale(pub f32);

impl Default for Scale {
    fn default() -> Self {
        Self(1.0)
    }
}
