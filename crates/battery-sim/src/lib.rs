//! State machine and headless simulation for BatteryCollector.
//!
//! The `controller`, `spawner` and `transition` modules are the
//! engine-agnostic core: a power-tracking win/lose state machine and the
//! spawn-volume activity controller it drives. `engine` hosts them on a
//! hecs world for headless play and testing.

pub mod config;
pub mod controller;
pub mod engine;
pub mod spawner;
pub mod systems;
pub mod transition;
pub mod world_setup;

pub use battery_core as core;
pub use config::SimConfig;
pub use controller::{GameStateController, PawnControl, TickReport};
pub use engine::SimulationEngine;
pub use spawner::{SpawnerControl, SpawnerRegistry};
