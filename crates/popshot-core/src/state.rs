//! Frame snapshot: the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::enums::GamePhase;
use crate::events::SimEvent;
use crate::types::{Color, Position, SimTime, Velocity, VisualHandle};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Live targets in spawn order.
    pub targets: Vec<TargetView>,
    pub particles: Vec<ParticleView>,
    pub score: ScoreView,
    pub events: Vec<SimEvent>,
}

/// A live target, for placing its visual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub seq: u64,
    pub handle: VisualHandle,
    pub position: Position,
    pub velocity: Velocity,
    pub color: Color,
}

/// A live particle, for placing and fading its visual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub handle: VisualHandle,
    pub position: Position,
    pub scale: f32,
    /// Remaining life over max life, in `(0, 1]`.
    pub fade: f32,
}

/// Running score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub total: u64,
    pub hits: u32,
}
