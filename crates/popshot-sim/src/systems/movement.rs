//! Kinematic integration for targets.
//!
//! Explicit Euler: position += velocity * dt. Particles integrate in
//! `particles::run`, since an expiring particle must not move.

use hecs::World;

use popshot_core::components::Target;
use popshot_core::types::{Position, Velocity};

/// Advance every live target by one frame of `dt` seconds.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, (pos, vel, _target)) in world.query_mut::<(&mut Position, &Velocity, &Target)>() {
        pos.advance(vel, dt);
    }
}
