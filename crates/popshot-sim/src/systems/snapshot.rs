//! Snapshot system: queries the ECS world and builds a complete FrameSnapshot.
//!
//! Read-only: it never modifies the world.

use hecs::World;

use popshot_core::components::{Particle, Scale, Target};
use popshot_core::enums::GamePhase;
use popshot_core::events::SimEvent;
use popshot_core::state::{FrameSnapshot, ParticleView, ScoreView, TargetView};
use popshot_core::types::{Color, Position, SimTime, Velocity, VisualHandle};

use crate::score::ScoreTracker;
use crate::systems::particles;

/// Build a complete FrameSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    score: &ScoreTracker,
    events: Vec<SimEvent>,
) -> FrameSnapshot {
    FrameSnapshot {
        time: *time,
        phase,
        targets: build_targets(world),
        particles: build_particles(world),
        score: ScoreView {
            total: score.total,
            hits: score.hits,
        },
        events,
    }
}

/// Live targets in spawn order.
fn build_targets(world: &World) -> Vec<TargetView> {
    let mut targets: Vec<TargetView> = world
        .query::<(&Target, &Position, &Velocity, &Color, &VisualHandle)>()
        .iter()
        .map(|(_, (target, pos, vel, color, handle))| TargetView {
            seq: target.seq,
            handle: *handle,
            position: *pos,
            velocity: *vel,
            color: *color,
        })
        .collect();

    targets.sort_by_key(|t| t.seq);
    targets
}

/// Live particles, ordered by handle for stable output.
fn build_particles(world: &World) -> Vec<ParticleView> {
    let mut views: Vec<ParticleView> = world
        .query::<(&Particle, &Position, &Scale, &VisualHandle)>()
        .iter()
        .map(|(_, (particle, pos, scale, handle))| ParticleView {
            handle: *handle,
            position: *pos,
            scale: scale.0,
            fade: particles::fade(particle),
        })
        .collect();

    views.sort_by_key(|p| p.handle);
    views
}
