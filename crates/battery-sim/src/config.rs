//! Session configuration.
//!
//! Every field has a default taken from the tuning constants, so a config
//! file only needs to name what it changes.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use battery_core::constants::*;

/// Placement of one spawn volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnVolumeConfig {
    pub origin: DVec3,
    #[serde(default = "default_extent")]
    pub extent: DVec3,
}

fn default_extent() -> DVec3 {
    DVec3::splat(SPAWN_VOLUME_EXTENT)
}

/// Configuration for starting a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    pub decay_rate: f64,
    pub initial_power: f64,
    pub battery_power: f64,
    pub collection_radius: f64,
    pub base_speed: f64,
    pub speed_factor: f64,
    pub spawn_delay_low: f64,
    pub spawn_delay_high: f64,
    pub player_start: DVec3,
    pub spawn_volumes: Vec<SpawnVolumeConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            decay_rate: DECAY_RATE,
            initial_power: INITIAL_POWER,
            battery_power: BATTERY_POWER,
            collection_radius: COLLECTION_RADIUS,
            base_speed: BASE_SPEED,
            speed_factor: SPEED_FACTOR,
            spawn_delay_low: SPAWN_DELAY_LOW,
            spawn_delay_high: SPAWN_DELAY_HIGH,
            player_start: DVec3::ZERO,
            spawn_volumes: vec![
                SpawnVolumeConfig {
                    origin: DVec3::new(0.0, 0.0, 0.0),
                    extent: default_extent(),
                },
                SpawnVolumeConfig {
                    origin: DVec3::new(1500.0, 0.0, 0.0),
                    extent: default_extent(),
                },
            ],
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimConfig =
            serde_json::from_str(json).context("failed to parse session config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.decay_rate.is_nan() || self.decay_rate < 0.0 {
            bail!("decay_rate must be non-negative, got {}", self.decay_rate);
        }
        if self.initial_power.is_nan() || self.initial_power <= 0.0 {
            bail!("initial_power must be positive, got {}", self.initial_power);
        }
        if !self.spawn_delay_low.is_finite()
            || !self.spawn_delay_high.is_finite()
            || self.spawn_delay_low < 0.0
            || self.spawn_delay_low > self.spawn_delay_high
        {
            bail!(
                "spawn delay range {}..{} is invalid",
                self.spawn_delay_low,
                self.spawn_delay_high
            );
        }
        if self.collection_radius < 0.0 {
            bail!(
                "collection_radius must be non-negative, got {}",
                self.collection_radius
            );
        }
        if !self.player_start.is_finite() {
            bail!("player_start must be finite, got {}", self.player_start);
        }
        for (index, volume) in self.spawn_volumes.iter().enumerate() {
            if !volume.origin.is_finite() {
                bail!(
                    "spawn volume {index} origin must be finite, got {}",
                    volume.origin
                );
            }
            // Sampling spans the full box, so twice the extent must stay finite.
            let span = volume.extent * 2.0;
            let far_corner = volume.origin + volume.extent.abs();
            if !span.is_finite() || !far_corner.is_finite() {
                bail!("spawn volume {index} extent {} is out of range", volume.extent);
            }
        }
        Ok(())
    }
}
