//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the `dt`/`now` arguments
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod templates;
pub mod tick;

pub use collision::{Rect, resolve_collisions};
pub use snapshot::Snapshot;
pub use spawn::try_spawn;
pub use state::{Bonus, Dimensions, GameEvent, GamePhase, GameState, Player, Tile, TileKind};
pub use templates::{NEGATIVE_TILES, POSITIVE_TILES, TileTemplate};
pub use tick::{
    TickInput, advance_player, advance_tiles, apply_input, recompute_spawn_rate, spawn_rate_for,
    tick, tick_protection,
};
