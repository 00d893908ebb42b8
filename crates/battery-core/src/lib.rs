//! Core types and definitions for the BatteryCollector game.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, commands, HUD snapshots, events, and tuning constants.
//! It has no dependency on any engine or runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
