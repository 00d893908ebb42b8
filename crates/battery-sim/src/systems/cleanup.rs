//! Cleanup system: removes pickups that have been collected.

use hecs::{Entity, World};

use battery_core::components::Pickup;

/// Despawn every inactive pickup.
/// Uses a pre-allocated buffer to avoid per-frame allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, pickup) in world.query_mut::<&Pickup>() {
        if !pickup.active {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
