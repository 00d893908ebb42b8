//! Pickup spawning system: active spawn volumes drop batteries on a timer.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use battery_core::components::SpawnVolume;
use battery_core::events::GameEvent;

use crate::world_setup::{random_delay, random_point_in_volume, spawn_battery};

/// Count down every active volume and spawn a battery each time its timer
/// expires. A frame longer than the delay can spawn several batteries; the
/// overshoot carries into the next delay. Inactive volumes keep their
/// remaining time.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    dt: f64,
    battery_power: f64,
    events: &mut Vec<GameEvent>,
) {
    let mut due = Vec::new();

    for (_entity, volume) in world.query_mut::<&mut SpawnVolume>() {
        if !volume.spawning_active {
            continue;
        }
        volume.time_until_spawn -= dt;
        while volume.time_until_spawn <= 0.0 {
            due.push(random_point_in_volume(rng, volume.origin, volume.extent));
            let delay = random_delay(rng, volume.delay_low, volume.delay_high);
            if delay <= 0.0 {
                // Zero delay: one battery per frame.
                volume.time_until_spawn = 0.0;
                break;
            }
            volume.time_until_spawn += delay;
        }
    }

    for position in due {
        spawn_battery(world, position, battery_power);
        log::debug!("battery spawned at {position}");
        events.push(GameEvent::PickupSpawned {
            position,
            power: battery_power,
        });
    }
}
