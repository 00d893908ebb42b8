//! HUD snapshot: the read-only view a presentation layer consumes each frame.

use serde::{Deserialize, Serialize};

use crate::enums::PlayState;
use crate::events::GameEvent;
use crate::types::SimTime;

/// Everything the HUD needs after a frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub time: SimTime,
    pub state: PlayState,
    pub power_to_win: f64,
    /// `None` when the player does not exist this frame.
    pub current_power: Option<f64>,
    pub initial_power: Option<f64>,
    /// Pickups in the world that can still be collected.
    pub active_pickups: u32,
    /// Spawn volumes currently spawning.
    pub active_spawners: u32,
    pub events: Vec<GameEvent>,
}
