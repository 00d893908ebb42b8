//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior beyond small helpers.
//! Game logic lives in systems and in the state controller.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Marks the player-controlled character (the tracked actor).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// World-space location of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location(pub DVec3);

/// Power carried by the player. Drives both survival and the win condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerLevel {
    /// Power the character started the level with.
    pub initial: f64,
    /// Current power. May go negative.
    pub current: f64,
}

impl PowerLevel {
    pub fn new(initial: f64) -> Self {
        Self {
            initial,
            current: initial,
        }
    }
}

/// Player-control state owned by the controller collaborator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerControl {
    /// False once input has been frozen (game over).
    pub input_enabled: bool,
}

impl Default for PlayerControl {
    fn default() -> Self {
        Self {
            input_enabled: true,
        }
    }
}

/// Movement and physics state of the character.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Locomotion {
    pub can_jump: bool,
    /// True when the mesh is simulating physics as a ragdoll.
    pub ragdoll: bool,
    /// Speed with zero power.
    pub base_speed: f64,
    /// Extra speed per unit of current power.
    pub speed_factor: f64,
    /// Number of jumps performed.
    pub jumps: u32,
}

impl Locomotion {
    /// Walking speed for the given power level. Never negative.
    pub fn speed(&self, power: f64) -> f64 {
        (self.base_speed + self.speed_factor * power).max(0.0)
    }
}

/// A collectible entity. Inactive pickups have been collected and are
/// waiting for cleanup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub active: bool,
}

/// Power granted by a battery pickup when collected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BatteryPickup {
    pub power: f64,
}

/// A box-shaped region that periodically spawns battery pickups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnVolume {
    /// Center of the box.
    pub origin: DVec3,
    /// Half-size of the box along each axis.
    pub extent: DVec3,
    /// Whether this volume is currently spawning.
    pub spawning_active: bool,
    /// Minimum delay between spawns (seconds).
    pub delay_low: f64,
    /// Maximum delay between spawns (seconds).
    pub delay_high: f64,
    /// Seconds left before the next spawn.
    pub time_until_spawn: f64,
}
