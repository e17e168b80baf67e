//! Target spawning: the fixed-rate spawn timer and the spawn operation.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use popshot_core::config::SpawnConfig;
use popshot_core::events::SimEvent;
use popshot_core::services::VisualBackend;
use popshot_core::types::{Position, VisualHandle};

use crate::world_setup;

/// Fixed-interval spawn gate, polled once per tick.
///
/// Fires when strictly more than `interval_ms` has passed since the last
/// spawn. A late tick fires once, not once per missed interval.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    pub interval_ms: u64,
    pub last_spawn_ms: u64,
}

impl SpawnTimer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_spawn_ms: 0,
        }
    }

    /// Count the next interval from `now_ms`.
    pub fn restart(&mut self, now_ms: u64) {
        self.last_spawn_ms = now_ms;
    }

    /// Check the gate at `now_ms`; resets it when it fires.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_spawn_ms) > self.interval_ms {
            self.last_spawn_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// Spawn one random target and assign it the next spawn sequence number.
pub fn spawn_target(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    visuals: &mut dyn VisualBackend,
    spawn: &SpawnConfig,
    next_seq: &mut u64,
    events: &mut Vec<SimEvent>,
) -> Entity {
    let seq = *next_seq;
    *next_seq += 1;

    let entity = world_setup::spawn_random_target(world, rng, visuals, spawn, seq);
    record_spawn(world, entity, seq, events);
    entity
}

/// Emit the spawn event for a freshly spawned target.
///
/// Panics if `entity` lacks a position or visual handle.
pub fn record_spawn(world: &World, entity: Entity, seq: u64, events: &mut Vec<SimEvent>) {
    let position = match world.get::<&Position>(entity) {
        Ok(pos) => *pos,
        Err(err) => panic!("record_spawn: {entity:?} has no position: {err}"),
    };
    let handle = match world.get::<&VisualHandle>(entity) {
        Ok(handle) => *handle,
        Err(err) => panic!("record_spawn: {entity:?} has no visual: {err}"),
    };

    log::debug!("target #{seq} spawned at {:?} as {handle:?}", position.0);
    events.push(SimEvent::TargetSpawned {
        seq,
        handle,
        position,
    });
}

/// Spawn a target if the timer is due. At most one spawn per call.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    visuals: &mut dyn VisualBackend,
    spawn: &SpawnConfig,
    timer: &mut SpawnTimer,
    next_seq: &mut u64,
    events: &mut Vec<SimEvent>,
    now_ms: u64,
) -> Option<Entity> {
    if !timer.poll(now_ms) {
        return None;
    }
    Some(spawn_target(world, rng, visuals, spawn, next_seq, events))
}
