//! Falling tile spawner
//!
//! At most one tile per call, gated by the current spawn rate. Horizontal
//! placement uses rejection sampling against live tiles; spacing is
//! best-effort and never blocks a spawn.

use glam::Vec2;
use rand::Rng;

use super::state::{Dimensions, GameState, Tile};
use super::templates::{NEGATIVE_TILES, POSITIVE_TILES, TileTemplate};

/// Whether enough time has passed since the last spawn
pub fn spawn_due(state: &GameState, now: i64) -> bool {
    (now - state.last_spawn_time) as f64 >= state.spawn_rate_ms
}

/// Whether `x` is within the overlap distance of any live tile
pub fn too_close(state: &GameState, x: f32) -> bool {
    let distance = state.tuning.overlap_prevention_distance;
    state.tiles().any(|tile| (tile.pos.x - x).abs() < distance)
}

/// Pick a spawn x, retrying while too close to live tiles.
///
/// After the attempt cap the last candidate is accepted as-is.
pub fn pick_spawn_x(state: &mut GameState) -> f32 {
    let max_x = (state.tuning.canvas_width - state.tuning.tile_size).max(0.0);
    let attempts = state.tuning.spawn_attempts.max(1);

    let mut x = 0.0;
    for attempt in 1..=attempts {
        x = if max_x > 0.0 {
            state.rng.random_range(0.0..max_x)
        } else {
            0.0
        };
        if !too_close(state, x) {
            return x;
        }
        if attempt == attempts {
            log::debug!("Spawn spacing gave up after {} attempts at x={:.1}", attempts, x);
        }
    }
    x
}

/// Choose the tile kind and its template
fn pick_template(state: &mut GameState) -> TileTemplate {
    let table: &[TileTemplate] = if state.rng.random_bool(state.tuning.positive_chance) {
        &POSITIVE_TILES
    } else {
        &NEGATIVE_TILES
    };
    table[state.rng.random_range(0..table.len())]
}

/// Initial velocity: optional signed drift, downward speed below the cap
fn pick_velocity(state: &mut GameState) -> Vec2 {
    let tuning = &state.tuning;
    let (drift_min, drift_max) = (tuning.drift_speed_min, tuning.drift_speed_max);
    let (fall_min, fall_max) = (tuning.min_fall_speed, tuning.max_tile_fall_speed);

    let vx = if state.rng.random_bool(state.tuning.horizontal_move_chance) {
        let sign = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let speed = drift_min + state.rng.random::<f32>() * (drift_max - drift_min);
        sign * speed
    } else {
        0.0
    };
    let vy = fall_min + state.rng.random::<f32>() * (fall_max - fall_min);

    Vec2::new(vx, vy)
}

/// Spawn one tile if the spawn interval has elapsed.
///
/// Returns the new tile's id.
pub fn try_spawn(state: &mut GameState, now: i64) -> Option<u32> {
    if !spawn_due(state, now) {
        return None;
    }

    let x = pick_spawn_x(state);
    let template = pick_template(state);
    let vel = pick_velocity(state);
    let size = state.tuning.tile_size;

    let tile = Tile {
        id: state.next_entity_id(),
        // Just above the visible area
        pos: Vec2::new(x, -size),
        vel,
        size: Dimensions::square(size),
        label: template.label.to_string(),
        color: template.color.to_string(),
        kind: template.kind,
    };
    let id = tile.id;

    log::debug!("Spawned tile {} ({}) at x={:.1}", id, tile.label, x);
    if tile.kind.is_positive() {
        state.positive_tiles.push(tile);
    } else {
        state.negative_tiles.push(tile);
    }
    state.last_spawn_time = now;

    Some(id)
}
