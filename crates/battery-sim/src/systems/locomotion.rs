//! Character locomotion. Walking speed grows with the player's power.

use glam::DVec3;
use hecs::{Entity, World};

use battery_core::components::{Location, Locomotion, PowerLevel};

/// Move the player along `direction` for one frame of `dt` seconds.
pub fn walk(world: &mut World, player: Entity, direction: DVec3, dt: f64) {
    let Ok((location, loco, power)) =
        world.query_one_mut::<(&mut Location, &Locomotion, &PowerLevel)>(player)
    else {
        return;
    };
    if loco.ragdoll {
        return;
    }
    let speed = loco.speed(power.current);
    location.0 += direction.normalize_or_zero() * speed * dt;
}

/// Jump if the character is still allowed to. Returns whether it jumped.
pub fn jump(world: &mut World, player: Entity) -> bool {
    let Ok(mut loco) = world.get::<&mut Locomotion>(player) else {
        return false;
    };
    if !loco.can_jump || loco.ragdoll {
        return false;
    }
    loco.jumps += 1;
    true
}
