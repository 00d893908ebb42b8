//! Enumeration types used throughout the game.

use serde::{Deserialize, Serialize};

/// Top-level play state of a session.
///
/// `GameOver` and `Won` are terminal. `Unknown` is the state before the
/// level has started and carries no side effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayState {
    Playing,
    GameOver,
    Won,
    #[default]
    Unknown,
}

impl PlayState {
    /// Whether no further transitions can leave this state.
    pub fn is_terminal(self) -> bool {
        matches!(self, PlayState::GameOver | PlayState::Won)
    }
}

/// A single side effect dispatched when the play state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideEffect {
    /// Turn spawning on for every registered spawn volume.
    EnableSpawners,
    /// Turn spawning off for every registered spawn volume.
    DisableSpawners,
    /// Stop accepting player input on the tracked actor.
    FreezeInput,
    /// Hand the tracked actor's body over to ragdoll physics.
    EnableRagdoll,
    /// Remove the tracked actor's ability to jump.
    DisableJump,
}
