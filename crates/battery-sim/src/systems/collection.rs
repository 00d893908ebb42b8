//! Collection system: the player picks up every active battery in reach.

use hecs::{Entity, World};

use battery_core::components::{BatteryPickup, Location, Pickup, PowerLevel};
use battery_core::events::GameEvent;

/// Collect every active pickup within `radius` of the player and add the
/// batteries' power to it. Returns the total power gained.
pub fn run(world: &mut World, player: Entity, radius: f64, events: &mut Vec<GameEvent>) -> f64 {
    let Ok(center) = world.get::<&Location>(player).map(|loc| loc.0) else {
        return 0.0;
    };

    let radius_sq = radius * radius;
    let mut count = 0;
    let mut gained = 0.0;
    for (_entity, (pickup, battery, location)) in
        world.query_mut::<(&mut Pickup, &BatteryPickup, &Location)>()
    {
        if !pickup.active || location.0.distance_squared(center) > radius_sq {
            continue;
        }
        // Collected pickups stay in the world until cleanup despawns them.
        pickup.active = false;
        count += 1;
        gained += battery.power;
    }

    if count == 0 {
        return 0.0;
    }
    log::debug!("collected {count} battery(ies) for {gained:.1} power");
    events.push(GameEvent::PickupCollected {
        count,
        power: gained,
    });
    if let Ok(mut power) = world.get::<&mut PowerLevel>(player) {
        power.current += gained;
        events.push(GameEvent::PowerChanged {
            current: power.current,
            delta: gained,
        });
    }
    gained
}
