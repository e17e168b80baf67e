//! Entity spawn factories.
//!
//! Creates target and particle entities together with their renderer
//! visuals, and tears both down again. Every entity spawned here owns
//! exactly one `VisualHandle`; `despawn_with_visual` is the only way that
//! handle is released.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use popshot_core::components::{Particle, Scale, Target};
use popshot_core::config::{ParticleConfig, SpawnConfig};
use popshot_core::enums::{Shading, Shape};
use popshot_core::services::{Material, VisualBackend};
use popshot_core::types::{Color, Position, Velocity, VisualHandle};

/// Spawn a target at a uniformly random point of the spawn volume,
/// drifting with a uniformly random in-plane velocity.
pub fn spawn_random_target(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    visuals: &mut dyn VisualBackend,
    spawn: &SpawnConfig,
    seq: u64,
) -> Entity {
    let half_width = spawn.area_width / 2.0;
    let half_height = spawn.area_height / 2.0;
    let half_jitter = spawn.depth_jitter / 2.0;

    let position = Position::new(
        rng.gen_range(-half_width..=half_width),
        rng.gen_range(spawn.center_y - half_height..=spawn.center_y + half_height),
        rng.gen_range(spawn.depth - half_jitter..=spawn.depth + half_jitter),
    );

    // Targets drift in the x/y plane only.
    let half_vx = spawn.speed_x / 2.0;
    let half_vy = spawn.speed_y / 2.0;
    let velocity = Velocity::new(
        rng.gen_range(-half_vx..=half_vx),
        rng.gen_range(-half_vy..=half_vy),
        0.0,
    );

    let color = Color(rng.gen_range(0..=0xFF_FFFF));

    spawn_target_at(world, visuals, spawn.target_radius, seq, position, velocity, color)
}

/// Spawn a target with fully specified kinematics.
pub fn spawn_target_at(
    world: &mut World,
    visuals: &mut dyn VisualBackend,
    radius: f32,
    seq: u64,
    position: Position,
    velocity: Velocity,
    color: Color,
) -> Entity {
    let handle = create_visual(
        visuals,
        Shape::Sphere { radius },
        Material {
            color,
            shading: Shading::Lit,
        },
    );

    world.spawn((Target { seq }, position, velocity, color, handle))
}

/// Spawn one explosion particle at full life and scale.
pub fn spawn_particle(
    world: &mut World,
    visuals: &mut dyn VisualBackend,
    config: &ParticleConfig,
    position: Position,
    velocity: Velocity,
    color: Color,
) -> Entity {
    let handle = create_visual(
        visuals,
        Shape::Cube { size: config.size },
        Material {
            color,
            shading: Shading::Unlit,
        },
    );

    let particle = Particle {
        life: config.lifetime_secs,
        max_life: config.lifetime_secs,
    };

    world.spawn((particle, position, velocity, Scale::default(), color, handle))
}

/// Release an entity's visual and drop the entity.
///
/// The handle is removed from the scene and disposed before the record
/// goes away. Panics if `entity` is not live or has no visual: either means
/// the one-handle-per-entity bookkeeping is already broken.
pub fn despawn_with_visual(world: &mut World, visuals: &mut dyn VisualBackend, entity: Entity) {
    let handle = match world.get::<&VisualHandle>(entity) {
        Ok(handle) => *handle,
        Err(err) => panic!("despawn of {entity:?} without a live visual: {err}"),
    };

    visuals.remove_from_scene(handle);
    visuals.dispose(handle);

    if let Err(err) = world.despawn(entity) {
        panic!("despawn of {entity:?} failed after releasing {handle:?}: {err}");
    }
}

fn create_visual(visuals: &mut dyn VisualBackend, shape: Shape, material: Material) -> VisualHandle {
    let handle = visuals.create(shape, material);
    visuals.add_to_scene(handle);
    handle
}
