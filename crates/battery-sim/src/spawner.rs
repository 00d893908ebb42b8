//! Spawner registry: the set of spawn volumes the state controller toggles.
//!
//! The registry only holds handles. Volumes are owned by the world and may
//! disappear between frames; the `SpawnerControl` collaborator resolves each
//! handle when the flag is forwarded.

use std::collections::HashSet;
use std::hash::Hash;

/// The world-side collaborator that owns the spawn volumes.
pub trait SpawnerControl<H> {
    /// Set the spawning flag on one volume. Returns `false` if the handle no
    /// longer refers to a live volume.
    fn set_spawning_active(&mut self, spawner: H, active: bool) -> bool;
}

/// De-duplicated list of spawn-volume handles discovered at level start.
#[derive(Debug, Clone)]
pub struct SpawnerRegistry<H> {
    spawners: Vec<H>,
}

impl<H> Default for SpawnerRegistry<H> {
    fn default() -> Self {
        Self {
            spawners: Vec::new(),
        }
    }
}

impl<H: Copy + Eq + Hash + std::fmt::Debug> SpawnerRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the registered handles. Duplicates are dropped, keeping the
    /// first occurrence so forwarding order follows discovery order.
    pub fn register_all(&mut self, spawners: impl IntoIterator<Item = H>) {
        let mut seen = HashSet::new();
        self.spawners = spawners
            .into_iter()
            .filter(|handle| seen.insert(*handle))
            .collect();
    }

    /// Forward the activation flag to every registered volume.
    /// Stale handles are skipped. Returns how many volumes accepted the flag.
    pub fn set_active<C>(&self, active: bool, control: &mut C) -> usize
    where
        C: SpawnerControl<H> + ?Sized,
    {
        let mut applied = 0;
        for &spawner in &self.spawners {
            if control.set_spawning_active(spawner, active) {
                applied += 1;
            } else {
                log::debug!("skipping stale spawn volume {spawner:?}");
            }
        }
        applied
    }

    pub fn handles(&self) -> &[H] {
        &self.spawners
    }

    pub fn len(&self) -> usize {
        self.spawners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spawners.is_empty()
    }
}
