//! Hit resolution: turns a selection event into at most one destroyed target.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use popshot_core::components::Target;
use popshot_core::config::GameConfig;
use popshot_core::events::SimEvent;
use popshot_core::services::{PickCandidate, ScoreDisplay, SelectEvent, TargetPicker, VisualBackend};
use popshot_core::types::{Color, Position, VisualHandle};

use crate::score::ScoreTracker;
use crate::systems::{cleanup, particles};

/// Outcome of a successful selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitReport {
    /// Spawn sequence number of the destroyed target.
    pub seq: u64,
    /// Where the selection hit, and where the explosion spawned.
    pub point: Position,
    pub color: Color,
    pub points: u64,
    /// Score after the hit.
    pub score: u64,
    pub particles: u32,
}

/// Everything the resolver mutates, borrowed from the engine for one call.
pub struct HitContext<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut ChaCha8Rng,
    pub visuals: &'a mut dyn VisualBackend,
    pub display: &'a mut dyn ScoreDisplay,
    pub score: &'a mut ScoreTracker,
    pub events: &'a mut Vec<SimEvent>,
}

/// Resolve one selection against the live targets.
///
/// Targets are tested newest first; the first one the picker reports as
/// hit explodes at the hit point, is removed, and scores. Scanning stops
/// there, so one selection destroys at most one target. With no hit,
/// nothing changes.
pub fn resolve(
    ctx: HitContext<'_>,
    config: &GameConfig,
    picker: &dyn TargetPicker,
    event: &SelectEvent,
) -> Option<HitReport> {
    let radius = config.spawn.target_radius;

    let mut candidates: Vec<(Entity, u64, PickCandidate, Color)> = ctx
        .world
        .query::<(&Target, &Position, &VisualHandle, &Color)>()
        .iter()
        .map(|(entity, (target, pos, handle, color))| {
            let candidate = PickCandidate {
                handle: *handle,
                position: *pos,
                radius,
            };
            (entity, target.seq, candidate, *color)
        })
        .collect();
    candidates.sort_unstable_by(|a, b| b.1.cmp(&a.1));

    let (entity, seq, intersection, color) =
        candidates.iter().find_map(|(entity, seq, candidate, color)| {
            picker
                .intersect(event, candidate)
                .map(|hit| (*entity, *seq, hit, *color))
        })?;

    let point = Position(intersection.point);
    let count = particles::spawn_explosion(
        ctx.world,
        ctx.rng,
        ctx.visuals,
        &config.particles,
        point,
        color,
        config.particles.count,
    );

    cleanup::remove_target(ctx.world, ctx.visuals, entity);

    let points = config.scoring.points_per_hit;
    ctx.score.record_hit(points);
    ctx.score.render(ctx.display);

    log::info!(
        "target #{seq} destroyed by {:?} at {:?}, score {}",
        event.source,
        point.0,
        ctx.score.total
    );
    ctx.events.push(SimEvent::TargetDestroyed {
        seq,
        point,
        color,
        points,
        score: ctx.score.total,
    });

    Some(HitReport {
        seq,
        point,
        color,
        points,
        score: ctx.score.total,
        particles: count,
    })
}
