//! Events emitted by the simulation for UI and effect feedback.

use serde::{Deserialize, Serialize};

use crate::types::{Color, Position, VisualHandle};

/// Something that happened during a tick or a selection.
/// Drained into the next `FrameSnapshot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A target entered the world.
    TargetSpawned {
        seq: u64,
        handle: VisualHandle,
        position: Position,
    },
    /// A target drifted out of bounds and was removed.
    TargetCulled { seq: u64, position: Position },
    /// A selection destroyed a target.
    TargetDestroyed {
        seq: u64,
        point: Position,
        color: Color,
        points: u64,
        score: u64,
    },
    /// Particles reached the end of their life this tick.
    ParticlesExpired { count: u32 },
}
