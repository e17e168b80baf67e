//! Simulation engine for POPSHOT.
//!
//! Owns the hecs ECS world, runs the target and particle systems once per
//! frame, resolves selections, and produces `FrameSnapshot`s for the host.

pub mod engine;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use popshot_core as core;
pub use systems::hit_resolver::HitReport;
