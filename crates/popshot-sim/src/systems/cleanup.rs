//! Cleanup system: removes targets that left the world bounds.

use hecs::{Entity, World};

use popshot_core::components::Target;
use popshot_core::config::BoundsConfig;
use popshot_core::events::SimEvent;
use popshot_core::services::VisualBackend;
use popshot_core::types::Position;

use crate::world_setup;

/// Remove every target with `|x| > max_abs_x`, `y < min_y` or `y > max_y`.
///
/// Collects first, then despawns, so the query never sees a half-removed
/// world. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    visuals: &mut dyn VisualBackend,
    bounds: &BoundsConfig,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    for (entity, (pos, target)) in world.query_mut::<(&Position, &Target)>() {
        if bounds.is_outside(pos.0.x, pos.0.y) {
            log::trace!("target #{} culled at {:?}", target.seq, pos.0);
            events.push(SimEvent::TargetCulled {
                seq: target.seq,
                position: *pos,
            });
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        remove_target(world, visuals, entity);
    }
}

/// Remove one live target and release its visual.
///
/// Panics if `entity` is not a live target.
pub fn remove_target(world: &mut World, visuals: &mut dyn VisualBackend, entity: Entity) {
    let is_target = world.get::<&Target>(entity).is_ok();
    assert!(is_target, "remove_target: {entity:?} is not a live target");

    world_setup::despawn_with_visual(world, visuals, entity);
}
