//! Player commands forwarded from the host's input layer.
//!
//! Commands are queued and processed at the next frame boundary. They are
//! ignored while the player's input is frozen.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Collect every active pickup within the collection radius.
    Collect,
    /// Walk along `direction` for the next frame. The vector is normalized.
    Walk { direction: DVec3 },
    /// Jump, if the character still can.
    Jump,
}
