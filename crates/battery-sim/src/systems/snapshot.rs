//! Snapshot system: builds the HUD snapshot from the world and controller.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use battery_core::components::{Pickup, PowerLevel, SpawnVolume};
use battery_core::events::GameEvent;
use battery_core::state::HudSnapshot;
use battery_core::types::SimTime;

use crate::controller::GameStateController;

/// Build a complete HudSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    controller: &GameStateController<Entity>,
    player: Option<Entity>,
    events: Vec<GameEvent>,
) -> HudSnapshot {
    let power = player.and_then(|p| world.get::<&PowerLevel>(p).ok().map(|pl| *pl));

    HudSnapshot {
        time: *time,
        state: controller.current_state(),
        power_to_win: controller.power_to_win(),
        current_power: power.map(|p| p.current),
        initial_power: power.map(|p| p.initial),
        active_pickups: count_active_pickups(world),
        active_spawners: count_active_spawners(world),
        events,
    }
}

fn count_active_pickups(world: &World) -> u32 {
    world
        .query::<&Pickup>()
        .iter()
        .filter(|(_, pickup)| pickup.active)
        .count() as u32
}

fn count_active_spawners(world: &World) -> u32 {
    world
        .query::<&SpawnVolume>()
        .iter()
        .filter(|(_, volume)| volume.spawning_active)
        .count() as u32
}
