//! ECS systems that operate on the level world each frame.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for
//! read-only). They do not own state; all state lives in components or in
//! the engine.

pub mod cleanup;
pub mod collection;
pub mod game_state;
pub mod locomotion;
pub mod pickup_spawner;
pub mod snapshot;
