//! Per-frame simulation tick
//!
//! `dt` is measured in nominal 60 Hz frames (1.0 == 16.667 ms), `now` in
//! epoch milliseconds. Both come from the frame driver; nothing here reads
//! the wall clock.

use super::collision::resolve_collisions;
use super::spawn::try_spawn;
use super::state::{GamePhase, GameState, Tile};
use crate::input::Direction;
use crate::tuning::Tuning;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Direction change since the previous tick, if any
    pub direction: Option<Direction>,
}

impl TickInput {
    pub fn steer(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
        }
    }
}

/// Apply a movement intent to the player
pub fn apply_input(state: &mut GameState, direction: Direction) {
    state.player = state.player.with_direction(direction, &state.tuning);
}

/// Gravity, movement, wall clamp and landing
pub fn advance_player(state: &mut GameState, dt: f32) {
    state.player = state.player.advanced(dt, &state.tuning);
}

/// Drain the shield timer
pub fn tick_protection(state: &mut GameState, dt: f32) {
    let drain = dt * state.tuning.protection_drain_ms_per_tick;
    state.player = state.player.drained(drain);
}

/// Move every tile, bounce off walls, drop tiles past the bottom edge
pub fn advance_tiles(state: &mut GameState, dt: f32) {
    let tuning = &state.tuning;
    state.positive_tiles = advance_collection(
        std::mem::take(&mut state.positive_tiles),
        dt,
        tuning.positive_tile_accel,
        tuning,
    );
    state.negative_tiles = advance_collection(
        std::mem::take(&mut state.negative_tiles),
        dt,
        tuning.negative_tile_accel,
        tuning,
    );
}

fn advance_collection(tiles: Vec<Tile>, dt: f32, accel: f32, tuning: &Tuning) -> Vec<Tile> {
    tiles
        .into_iter()
        .map(|tile| tile.advanced(dt, accel, tuning))
        .filter(|tile| !tile.is_off_screen(tuning))
        .collect()
}

/// Spawn interval for a given elapsed run time
pub fn spawn_rate_for(elapsed_ms: i64, tuning: &Tuning) -> f64 {
    let elapsed_secs = elapsed_ms.max(0) as f64 / 1000.0;
    let rate = tuning.initial_spawn_rate_ms - elapsed_secs * tuning.difficulty_rate * 1000.0;
    rate.max(tuning.min_spawn_rate_ms)
}

/// Recompute the spawn interval from elapsed time (not cumulative)
pub fn recompute_spawn_rate(state: &mut GameState, elapsed_ms: i64) {
    state.spawn_rate_ms = spawn_rate_for(elapsed_ms, &state.tuning);
}

/// Clamp a driver-supplied delta into the range the engine integrates
pub fn sanitize_dt(dt: f32, tuning: &Tuning) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, tuning.max_frame_delta)
    } else {
        0.0
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, now: i64) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let dt = sanitize_dt(dt, &state.tuning);
    state.last_now = Some(now);

    if let Some(direction) = input.direction {
        apply_input(state, direction);
    }
    advance_player(state, dt);
    tick_protection(state, dt);
    advance_tiles(state, dt);

    resolve_collisions(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    try_spawn(state, now);

    let elapsed = state.elapsed_ms(now);
    recompute_spawn_rate(state, elapsed);
}
