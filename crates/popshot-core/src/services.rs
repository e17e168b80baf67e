//! Interfaces to the collaborators the simulation does not own.
//!
//! The renderer, the picking (ray-cast) subsystem, and the score widget are
//! external. The engine drives them through these traits and never reaches
//! past them.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{InputSource, Shading, Shape};
use crate::types::{Color, Position, Ray, VisualHandle};

/// Appearance of a visual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub shading: Shading,
}

/// Renderer-side lifecycle of entity visuals.
///
/// Every handle returned by `create` is added to the scene once, removed
/// once, and disposed once, in that order. Implementations may treat any
/// other sequence as a contract violation.
pub trait VisualBackend {
    fn create(&mut self, shape: Shape, material: Material) -> VisualHandle;
    fn add_to_scene(&mut self, handle: VisualHandle);
    fn remove_from_scene(&mut self, handle: VisualHandle);
    fn dispose(&mut self, handle: VisualHandle);
}

/// The on-screen score text widget.
pub trait ScoreDisplay {
    fn set_text(&mut self, text: &str);
}

/// A user's aim/click, as delivered by the input subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectEvent {
    #[serde(default)]
    pub source: InputSource,
    pub ray: Ray,
}

/// What the picker needs to know about one live target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickCandidate {
    pub handle: VisualHandle,
    pub position: Position,
    pub radius: f32,
}

/// A positive pick result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    /// World-space hit point.
    pub point: Vec3,
    /// Distance from the ray origin.
    pub distance: f32,
}

/// The ray-intersection service.
pub trait TargetPicker {
    /// Does `event` hit the visual of `candidate`? `None` means no.
    fn intersect(&self, event: &SelectEvent, candidate: &PickCandidate) -> Option<Intersection>;
}
