//! Events emitted by the simulation for HUD and audio feedback.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::PlayState;

/// Something observable that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// The play state changed.
    StateChanged { from: PlayState, to: PlayState },
    /// Spawning was switched on or off. `applied` counts live volumes.
    SpawnersToggled { active: bool, applied: usize },
    /// A battery appeared inside a spawn volume.
    PickupSpawned { position: DVec3, power: f64 },
    /// The player collected one or more batteries in a single action.
    PickupCollected { count: u32, power: f64 },
    /// The player's power changed by `delta` (decay or collection).
    PowerChanged { current: f64, delta: f64 },
}
