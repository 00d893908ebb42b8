//! Transition table: which side effects each play state triggers on entry.
//!
//! Keyed by the state being entered. The controller looks effects up here
//! rather than inlining them, so the table can be audited and tested alone.

use battery_core::enums::{PlayState, SideEffect};

/// A state change that actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: PlayState,
    pub to: PlayState,
}

impl Transition {
    /// Side effects to dispatch for this transition.
    pub fn effects(&self) -> &'static [SideEffect] {
        effects_for(self.to)
    }
}

/// Side effects dispatched when entering `state`.
pub fn effects_for(state: PlayState) -> &'static [SideEffect] {
    match state {
        PlayState::Playing => &[SideEffect::EnableSpawners],
        PlayState::GameOver => &[
            SideEffect::DisableSpawners,
            SideEffect::FreezeInput,
            SideEffect::EnableRagdoll,
            SideEffect::DisableJump,
        ],
        PlayState::Won => &[SideEffect::DisableSpawners],
        PlayState::Unknown => &[],
    }
}
