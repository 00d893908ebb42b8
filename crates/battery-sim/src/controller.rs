//! Game state controller: the power-tracking win/lose state machine.
//!
//! Engine-agnostic: the controller never touches entities directly. It reads
//! the tracked actor's power once per frame, hands back a decay delta, and
//! dispatches state-entry side effects to collaborators that own the actual
//! spawn volumes and pawn. Those collaborators resolve their handles each
//! frame and report absent targets instead of failing.

use std::fmt::Debug;
use std::hash::Hash;

use battery_core::constants::POWER_TO_WIN_MULTIPLIER;
use battery_core::enums::{PlayState, SideEffect};

use crate::spawner::{SpawnerControl, SpawnerRegistry};
use crate::transition::{effects_for, Transition};

/// The player-control and physics collaborators for the tracked actor.
///
/// Each method returns `false` when the pawn is not available this frame.
pub trait PawnControl {
    fn disable_input(&mut self) -> bool;
    fn enable_ragdoll(&mut self) -> bool;
    fn disable_jump(&mut self) -> bool;
}

/// Result of one `update` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// State after the update.
    pub state: PlayState,
    /// Power change to apply to the tracked actor. Zero unless decaying.
    pub power_delta: f64,
    /// Set when this update changed the state.
    pub transition: Option<Transition>,
}

impl TickReport {
    fn idle(state: PlayState) -> Self {
        Self {
            state,
            power_delta: 0.0,
            transition: None,
        }
    }
}

/// Owns the play state, decay rate and win threshold for one level.
#[derive(Debug, Clone)]
pub struct GameStateController<H> {
    current_state: PlayState,
    decay_rate: f64,
    initial_power: f64,
    power_to_win: f64,
    spawners: SpawnerRegistry<H>,
    initialized: bool,
}

impl<H: Copy + Eq + Hash + Debug> GameStateController<H> {
    /// Create a controller in the `Unknown` state. Negative (or NaN) decay
    /// rates are clamped to zero.
    pub fn new(decay_rate: f64) -> Self {
        Self {
            current_state: PlayState::Unknown,
            decay_rate: decay_rate.max(0.0),
            initial_power: 0.0,
            power_to_win: 0.0,
            spawners: SpawnerRegistry::new(),
            initialized: false,
        }
    }

    /// Level start: fix the win threshold, register the discovered spawn
    /// volumes and enter `Playing`. Only the first call has any effect; the
    /// threshold and registry are fixed for the rest of the level.
    pub fn initialize<C>(
        &mut self,
        initial_power: f64,
        spawners: impl IntoIterator<Item = H>,
        control: &mut C,
    ) -> Option<Transition>
    where
        C: SpawnerControl<H> + PawnControl,
    {
        if self.initialized {
            log::warn!("initialize called twice; ignoring");
            return None;
        }
        self.initialized = true;
        self.initial_power = initial_power;
        self.power_to_win = initial_power * POWER_TO_WIN_MULTIPLIER;
        self.spawners.register_all(spawners);
        log::info!(
            "level start: power to win {:.1}, {} spawn volume(s)",
            self.power_to_win,
            self.spawners.len()
        );
        self.set_state(PlayState::Playing, control)
    }

    /// Advance the state machine by one frame.
    ///
    /// `current_power` is `None` when the tracked actor does not exist this
    /// frame; the whole step is skipped. Outside `Playing` nothing is
    /// evaluated, so the terminal states stay put.
    pub fn update<C>(&mut self, dt: f64, current_power: Option<f64>, control: &mut C) -> TickReport
    where
        C: SpawnerControl<H> + PawnControl,
    {
        let Some(power) = current_power else {
            return TickReport::idle(self.current_state);
        };
        if self.current_state != PlayState::Playing {
            return TickReport::idle(self.current_state);
        }

        if power > self.power_to_win {
            let transition = self.set_state(PlayState::Won, control);
            TickReport {
                state: self.current_state,
                power_delta: 0.0,
                transition,
            }
        } else if power > 0.0 {
            let delta = -dt * self.decay_rate * self.initial_power;
            log::trace!("decay {delta:.4} at power {power:.2}");
            TickReport {
                state: self.current_state,
                power_delta: delta,
                transition: None,
            }
        } else {
            let transition = self.set_state(PlayState::GameOver, control);
            TickReport {
                state: self.current_state,
                power_delta: 0.0,
                transition,
            }
        }
    }

    /// Assign a new state. Side effects run only when the state actually
    /// changes; assigning the current state is a no-op.
    pub fn set_state<C>(&mut self, new_state: PlayState, control: &mut C) -> Option<Transition>
    where
        C: SpawnerControl<H> + PawnControl,
    {
        if new_state == self.current_state {
            return None;
        }
        let transition = Transition {
            from: self.current_state,
            to: new_state,
        };
        self.current_state = new_state;
        log::info!("play state {:?} -> {:?}", transition.from, transition.to);

        for &effect in effects_for(new_state) {
            self.dispatch(effect, control);
        }
        Some(transition)
    }

    fn dispatch<C>(&self, effect: SideEffect, control: &mut C)
    where
        C: SpawnerControl<H> + PawnControl,
    {
        let applied = match effect {
            SideEffect::EnableSpawners => {
                self.spawners.set_active(true, control);
                true
            }
            SideEffect::DisableSpawners => {
                self.spawners.set_active(false, control);
                true
            }
            SideEffect::FreezeInput => control.disable_input(),
            SideEffect::EnableRagdoll => control.enable_ragdoll(),
            SideEffect::DisableJump => control.disable_jump(),
        };
        if !applied {
            log::debug!("{effect:?} skipped: tracked actor absent");
        }
    }

    /// Power the tracked actor must exceed to win.
    pub fn power_to_win(&self) -> f64 {
        self.power_to_win
    }

    /// Current play state.
    pub fn current_state(&self) -> PlayState {
        self.current_state
    }

    /// Fraction of the initial power lost per second.
    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    /// The tracked actor's power at level start.
    pub fn initial_power(&self) -> f64 {
        self.initial_power
    }

    /// Spawn volumes registered at level start.
    pub fn spawners(&self) -> &SpawnerRegistry<H> {
        &self.spawners
    }
}
