//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Engine created, no session started yet.
    #[default]
    Idle,
    /// Targets spawn and move; selections are resolved.
    Active,
    /// Time is frozen; selections are ignored.
    Paused,
}

/// Where a selection came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputSource {
    /// Mouse or touch pointer (non-XR sessions).
    #[default]
    Pointer,
    LeftController,
    RightController,
    LeftHand,
    RightHand,
}

/// Geometry requested from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere { radius: f32 },
    Cube { size: f32 },
}

/// Shading model requested from the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shading {
    /// Responds to scene lighting.
    #[default]
    Lit,
    /// Flat color, ignores lighting.
    Unlit,
}
