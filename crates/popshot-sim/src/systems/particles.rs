//! Explosion particles: burst spawning, life decay, motion, and shrink.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use popshot_core::components::{Particle, Scale};
use popshot_core::config::ParticleConfig;
use popshot_core::events::SimEvent;
use popshot_core::services::VisualBackend;
use popshot_core::types::{Color, Position, Velocity};

use crate::world_setup;

/// Spawn a burst of `count` particles at `position`, each flying off with
/// an independent uniformly random velocity. Returns the number spawned.
pub fn spawn_explosion(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    visuals: &mut dyn VisualBackend,
    config: &ParticleConfig,
    position: Position,
    color: Color,
    count: u32,
) -> u32 {
    let half = config.speed / 2.0;
    for _ in 0..count {
        let velocity = Velocity::new(
            rng.gen_range(-half..=half),
            rng.gen_range(-half..=half),
            rng.gen_range(-half..=half),
        );
        world_setup::spawn_particle(world, visuals, config, position, velocity, color);
    }

    log::debug!("explosion of {count} particles at {:?}", position.0);
    count
}

/// Age, move, and shrink every particle; remove the expired ones.
///
/// A particle whose life drops to zero or below this tick is removed
/// without moving. Survivors move by `velocity * dt` and shrink by the
/// configured decay.
pub fn run(
    world: &mut World,
    visuals: &mut dyn VisualBackend,
    config: &ParticleConfig,
    dt: f32,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    let shrink = config.decay.multiplier(dt);

    for (entity, (particle, pos, vel, scale)) in
        world.query_mut::<(&mut Particle, &mut Position, &Velocity, &mut Scale)>()
    {
        particle.life -= dt;
        if particle.life <= 0.0 {
            despawn_buffer.push(entity);
            continue;
        }

        pos.advance(vel, dt);
        scale.0 *= shrink;
    }

    if despawn_buffer.is_empty() {
        return;
    }

    let count = despawn_buffer.len() as u32;
    log::trace!("{count} particles expired");
    events.push(SimEvent::ParticlesExpired { count });

    for entity in despawn_buffer.drain(..) {
        world_setup::despawn_with_visual(world, visuals, entity);
    }
}

/// Remaining life over max life, in `(0, 1]` for a live particle.
pub fn fade(particle: &Particle) -> f32 {
    particle.life / particle.max_life
}
