//! Entity spawn factories for setting up a level.
//!
//! Creates the player character, spawn volumes, and battery pickups with
//! appropriate component bundles.

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use battery_core::components::*;

use crate::config::{SimConfig, SpawnVolumeConfig};

/// Set up the level: the player and every configured spawn volume.
/// Returns the player entity.
pub fn setup_level(world: &mut World, rng: &mut ChaCha8Rng, config: &SimConfig) -> hecs::Entity {
    let player = spawn_player(world, config);
    for volume in &config.spawn_volumes {
        spawn_spawn_volume(world, rng, volume, config);
    }
    player
}

/// Spawn the player character at its start location with full power.
pub fn spawn_player(world: &mut World, config: &SimConfig) -> hecs::Entity {
    world.spawn((
        Player,
        Location(config.player_start),
        PowerLevel::new(config.initial_power),
        PlayerControl::default(),
        Locomotion {
            can_jump: true,
            ragdoll: false,
            base_speed: config.base_speed,
            speed_factor: config.speed_factor,
            jumps: 0,
        },
    ))
}

/// Spawn a volume. It starts idle; the state controller switches it on when
/// play begins.
pub fn spawn_spawn_volume(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    volume: &SpawnVolumeConfig,
    config: &SimConfig,
) -> hecs::Entity {
    let delay_low = config.spawn_delay_low;
    let delay_high = config.spawn_delay_high;
    world.spawn((SpawnVolume {
        origin: volume.origin,
        extent: volume.extent.abs(),
        spawning_active: false,
        delay_low,
        delay_high,
        time_until_spawn: random_delay(rng, delay_low, delay_high),
    },))
}

/// Spawn an active battery pickup.
pub fn spawn_battery(world: &mut World, position: DVec3, power: f64) -> hecs::Entity {
    world.spawn((Pickup { active: true }, BatteryPickup { power }, Location(position)))
}

/// A random point inside the box around `origin`.
pub fn random_point_in_volume(rng: &mut ChaCha8Rng, origin: DVec3, extent: DVec3) -> DVec3 {
    let offset = DVec3::new(
        rng.gen_range(-extent.x..=extent.x),
        rng.gen_range(-extent.y..=extent.y),
        rng.gen_range(-extent.z..=extent.z),
    );
    origin + offset
}

/// A random spawn delay in `low..=high` seconds.
pub fn random_delay(rng: &mut ChaCha8Rng, low: f64, high: f64) -> f64 {
    rng.gen_range(low..=high)
}
