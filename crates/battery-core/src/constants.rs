//! Gameplay constants and tuning parameters.

/// Default frame rate used by headless runs (Hz).
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Seconds per frame at the default frame rate.
pub const DEFAULT_DT: f64 = 1.0 / DEFAULT_FRAME_RATE as f64;

// --- Power ---

/// Fraction of the initial power lost per second.
pub const DECAY_RATE: f64 = 0.01;

/// Power needed to win, as a multiple of the character's initial power.
pub const POWER_TO_WIN_MULTIPLIER: f64 = 1.25;

/// Power the character starts a level with.
pub const INITIAL_POWER: f64 = 2000.0;

/// Power granted by one battery.
pub const BATTERY_POWER: f64 = 150.0;

// --- Character ---

/// Radius of the collection sphere around the character.
pub const COLLECTION_RADIUS: f64 = 200.0;

/// Walking speed with no power.
pub const BASE_SPEED: f64 = 10.0;

/// Walking speed gained per unit of power.
pub const SPEED_FACTOR: f64 = 0.75;

// --- Spawning ---

/// Shortest delay between two spawns of one volume (seconds).
pub const SPAWN_DELAY_LOW: f64 = 1.0;

/// Longest delay between two spawns of one volume (seconds).
pub const SPAWN_DELAY_HIGH: f64 = 4.5;

/// Default half-size of a spawn volume box.
pub const SPAWN_VOLUME_EXTENT: f64 = 500.0;
