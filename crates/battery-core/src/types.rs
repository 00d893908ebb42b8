//! Fundamental simulation types.

use serde::{Deserialize, Serialize};

pub use glam::DVec3;

/// Frame-driven simulation time.
///
/// Frames have variable length, so elapsed time is accumulated from the
/// delta passed to each step rather than derived from the tick count.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames simulated so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
