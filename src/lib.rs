//! Virtue Fall - A single-screen falling-tile survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, collisions, run state)
//! - `input`: Held-key resolution into per-frame directions
//! - `platform`: Frame driver helpers and the browser facade
//! - `tuning`: Data-driven game balance
//! - `ui`: HUD readouts derived from simulation snapshots

pub mod input;
pub mod platform;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use input::{Direction, HeldKeys};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Nominal frame length; deltas are expressed in multiples of this
    pub const FRAME_MS: f32 = 16.667;

    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_JUMP_FORCE: f32 = 15.0;
    pub const GRAVITY: f32 = 0.8;
    /// Gap between the player's feet and the bottom edge
    pub const GROUND_MARGIN: f32 = 10.0;

    /// Falling tile defaults
    pub const TILE_SIZE: f32 = 40.0;
    pub const MAX_TILE_FALL_SPEED: f32 = 6.0;
    pub const MIN_TILE_FALL_SPEED: f32 = 2.0;
    pub const TILE_DRIFT_SPEED_MIN: f32 = 1.0;
    pub const TILE_DRIFT_SPEED_MAX: f32 = 2.0;
    /// Per-tick fall acceleration (negatives speed up twice as fast)
    pub const POSITIVE_TILE_ACCEL: f32 = 0.01;
    pub const NEGATIVE_TILE_ACCEL: f32 = 0.02;

    /// Spawner
    pub const INITIAL_SPAWN_RATE_MS: f64 = 1200.0;
    pub const MIN_SPAWN_RATE_MS: f64 = 250.0;
    pub const DIFFICULTY_RATE: f64 = 0.15;
    pub const OVERLAP_PREVENTION_DISTANCE: f32 = TILE_SIZE * 1.5;
    pub const SPAWN_ATTEMPTS: u32 = 10;
    pub const POSITIVE_CHANCE: f64 = 0.3;
    pub const HORIZONTAL_MOVE_CHANCE: f64 = 0.4;

    /// Protection timer drain per unit of delta
    pub const PROTECTION_DRAIN_MS_PER_TICK: f32 = 1000.0;

    /// Largest delta the engine will integrate in one call (100 ms)
    pub const MAX_FRAME_DELTA: f32 = 6.0;
}

/// Convert a wall-clock interval into normalized frame ticks
#[inline]
pub fn ms_to_ticks(ms: f64) -> f32 {
    (ms / consts::FRAME_MS as f64) as f32
}
