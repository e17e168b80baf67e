//! ECS systems that operate on the simulation world.
//!
//! Systems are free functions that take `&mut World` (or `&World` for
//! read-only) plus whatever engine state they touch. They do not own
//! state; entity state lives in components.

pub mod cleanup;
pub mod hit_resolver;
pub mod movement;
pub mod particles;
pub mod snapshot;
pub mod spawner;
