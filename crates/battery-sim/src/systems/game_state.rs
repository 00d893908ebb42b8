//! Game state system: bridges the engine-agnostic controller to the world.
//!
//! `WorldEffects` is the collaborator the controller dispatches side effects
//! to. It resolves spawn-volume and player handles against the world every
//! time it is called, so despawned entities are reported as absent.

use hecs::{Component, Entity, World};

use battery_core::components::{Locomotion, PlayerControl, PowerLevel, SpawnVolume};
use battery_core::enums::SideEffect;
use battery_core::events::GameEvent;

use crate::controller::{GameStateController, PawnControl, TickReport};
use crate::spawner::SpawnerControl;
use crate::transition::Transition;

/// Side-effect sink backed by the hecs world.
pub struct WorldEffects<'w> {
    world: &'w mut World,
    player: Option<Entity>,
    /// Spawn volumes that accepted a flag during this dispatch.
    pub spawners_applied: usize,
}

impl<'w> WorldEffects<'w> {
    pub fn new(world: &'w mut World, player: Option<Entity>) -> Self {
        Self {
            world,
            player,
            spawners_applied: 0,
        }
    }

    fn with_player<T: Component>(&mut self, f: impl FnOnce(&mut T)) -> bool {
        let Some(player) = self.player else {
            return false;
        };
        match self.world.get::<&mut T>(player) {
            Ok(mut component) => {
                f(&mut *component);
                true
            }
            Err(_) => false,
        }
    }
}

impl SpawnerControl<Entity> for WorldEffects<'_> {
    fn set_spawning_active(&mut self, spawner: Entity, active: bool) -> bool {
        match self.world.get::<&mut SpawnVolume>(spawner) {
            Ok(mut volume) => {
                volume.spawning_active = active;
                self.spawners_applied += 1;
                true
            }
            Err(_) => false,
        }
    }
}

impl PawnControl for WorldEffects<'_> {
    fn disable_input(&mut self) -> bool {
        self.with_player::<PlayerControl>(|control| control.input_enabled = false)
    }

    fn enable_ragdoll(&mut self) -> bool {
        self.with_player::<Locomotion>(|loco| loco.ragdoll = true)
    }

    fn disable_jump(&mut self) -> bool {
        self.with_player::<Locomotion>(|loco| loco.can_jump = false)
    }
}

/// Current power of the player, if it exists this frame.
pub fn resolve_power(world: &World, player: Option<Entity>) -> Option<f64> {
    let player = player?;
    world.get::<&PowerLevel>(player).ok().map(|power| power.current)
}

/// Run one controller step and apply its decay delta to the player.
pub fn run(
    world: &mut World,
    controller: &mut GameStateController<Entity>,
    player: Option<Entity>,
    dt: f64,
    events: &mut Vec<GameEvent>,
) -> TickReport {
    let current_power = resolve_power(world, player);

    let mut effects = WorldEffects::new(world, player);
    let report = controller.update(dt, current_power, &mut effects);
    let applied = effects.spawners_applied;

    if report.power_delta != 0.0 {
        if let Some(player) = player {
            if let Ok(mut power) = world.get::<&mut PowerLevel>(player) {
                power.current += report.power_delta;
                events.push(GameEvent::PowerChanged {
                    current: power.current,
                    delta: report.power_delta,
                });
            }
        }
    }

    if let Some(transition) = report.transition {
        record_transition(transition, applied, events);
    }
    report
}

/// Emit the events describing a transition and its spawner side effects.
pub fn record_transition(transition: Transition, spawners_applied: usize, events: &mut Vec<GameEvent>) {
    events.push(GameEvent::StateChanged {
        from: transition.from,
        to: transition.to,
    });
    for effect in transition.effects() {
        let active = match effect {
            SideEffect::EnableSpawners => true,
            SideEffect::DisableSpawners => false,
            _ => continue,
        };
        events.push(GameEvent::SpawnersToggled {
            active,
            applied: spawners_applied,
        });
    }
}
