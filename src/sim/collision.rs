//! Collision detection and response
//!
//! Everything is an axis-aligned rectangle. Positive tiles are checked
//! first and regardless of shield state; negative tiles only hurt a player
//! who was unshielded when the frame began. Within each pass the first overlapping tile in spawn
//! order wins and at most one tile is resolved.

use glam::Vec2;

use super::state::{Bonus, Dimensions, GameEvent, GamePhase, GameState, Player, Tile, TileKind};

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Dimensions) -> Self {
        Self {
            min: pos,
            max: pos + Vec2::new(size.width, size.height),
        }
    }

    /// Strict overlap; rectangles that only share an edge do not touch
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

impl Tile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Index of the first tile overlapping `target`
pub fn first_overlap(tiles: &[Tile], target: &Rect) -> Option<usize> {
    tiles.iter().position(|tile| tile.rect().overlaps(target))
}

/// Resolve player contact with live tiles.
///
/// Does nothing unless the run is playing, so calling it twice in one
/// frame never double-applies an effect.
pub fn resolve_collisions(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let player_rect = state.player.rect();
    // Shield state as the frame began; a shield collected now protects from the next frame
    let was_protected = state.player.is_protected;

    if let Some(index) = first_overlap(&state.positive_tiles, &player_rect) {
        let tile = state.positive_tiles.remove(index);
        collect_positive(state, tile);
    }

    if was_protected {
        return;
    }

    if let Some(index) = first_overlap(&state.negative_tiles, &player_rect) {
        let tile = &state.negative_tiles[index];
        let (tile_id, label) = (tile.id, tile.label.clone());
        log::debug!("Fatal collision with tile {} ({})", tile_id, label);
        state.emit(GameEvent::FatalCollision {
            tile_id,
            label: label.clone(),
        });
        state.end(&label);
    }
}

fn collect_positive(state: &mut GameState, tile: Tile) {
    let TileKind::Positive { bonus, value } = tile.kind else {
        log::warn!("Tile {} in positive collection is not positive", tile.id);
        return;
    };
    let bonus_ms = value * 1000.0;

    match bonus {
        Bonus::Protection => {
            state.player = state.player.shielded(bonus_ms);
        }
        Bonus::Time => {
            // Survival time is measured from start_time, so rewinding it credits the bonus
            state.start_time = state.start_time.map(|t| t - bonus_ms.round() as i64);
        }
    }

    log::debug!("Collected {} ({:?} +{}s)", tile.label, bonus, value);
    state.emit(GameEvent::PositiveCollected {
        tile_id: tile.id,
        label: tile.label,
        bonus,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameEvent;

    fn tile_at(state: &mut GameState, pos: Vec2, label: &str, kind: TileKind) -> Tile {
        Tile {
            id: state.next_entity_id(),
            pos,
            vel: Vec2::new(0.0, 3.0),
            size: Dimensions::square(40.0),
            label: label.to_string(),
            color: "#000000".to_string(),
            kind,
        }
    }

    fn playing() -> GameState {
        let mut state = GameState::new(42);
        state.start(100_000);
        state.drain_events();
        state
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Dimensions::square(10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Dimensions::square(10.0));
        let touching = Rect::new(Vec2::new(10.0, 0.0), Dimensions::square(10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&touching));
    }

    #[test]
    fn test_negative_tile_ends_run() {
        let mut state = playing();
        let pos = state.player.pos;
        let tile = tile_at(&mut state, pos, "Bullying", TileKind::Negative);
        state.negative_tiles.push(tile);

        resolve_collisions(&mut state);

        assert_eq!(state.phase, GamePhase::Ended);
        assert!(state.is_game_over);
        assert_eq!(state.game_over_reason, "Bullying");
        let events = state.drain_events();
        assert!(matches!(&events[0], GameEvent::FatalCollision { label, .. } if label == "Bullying"));
        assert!(matches!(&events[1], GameEvent::RunEnded { .. }));
    }

    #[test]
    fn test_shield_blocks_negative() {
        let mut state = playing();
        state.player = state.player.shielded(1000.0);
        let pos = state.player.pos;
        let tile = tile_at(&mut state, pos, "Lying", TileKind::Negative);
        state.negative_tiles.push(tile);

        resolve_collisions(&mut state);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.negative_tiles.len(), 1);
    }

    #[test]
    fn test_protection_bonus_sets_timer() {
        let mut state = playing();
        let pos = state.player.pos;
        let kind = TileKind::Positive {
            bonus: Bonus::Protection,
            value: 5.0,
        };
        let tile = tile_at(&mut state, pos, "Honesty", kind);
        state.positive_tiles.push(tile);

        resolve_collisions(&mut state);

        assert!(state.player.is_protected);
        assert_eq!(state.player.protection_ms, 5000.0);
        assert!(state.positive_tiles.is_empty());
    }

    #[test]
    fn test_time_bonus_rewinds_start() {
        let mut state = playing();
        let pos = state.player.pos;
        let kind = TileKind::Positive {
            bonus: Bonus::Time,
            value: 8.0,
        };
        let tile = tile_at(&mut state, pos, "Respect", kind);
        state.positive_tiles.push(tile);

        resolve_collisions(&mut state);

        assert_eq!(state.start_time, Some(100_000 - 8_000));
        let events = state.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], GameEvent::PositiveCollected { bonus: Bonus::Time, .. }));
    }

    #[test]
    fn test_first_positive_in_spawn_order_wins() {
        let mut state = playing();
        let pos = state.player.pos;
        let first = tile_at(
            &mut state,
            pos,
            "Kindness",
            TileKind::Positive { bonus: Bonus::Time, value: 5.0 },
        );
        let second = tile_at(
            &mut state,
            pos,
            "Wisdom",
            TileKind::Positive { bonus: Bonus::Time, value: 12.0 },
        );
        let second_id = second.id;
        state.positive_tiles.push(first);
        state.positive_tiles.push(second);

        resolve_collisions(&mut state);

        assert_eq!(state.positive_tiles.len(), 1);
        assert_eq!(state.positive_tiles[0].id, second_id);
        assert_eq!(state.start_time, Some(95_000));
    }

    #[test]
    fn test_shield_from_same_frame_does_not_protect() {
        // The shield is collected, but only counts from the next frame
        let mut state = playing();
        let pos = state.player.pos;
        let shield = tile_at(
            &mut state,
            pos,
            "Empathy",
            TileKind::Positive { bonus: Bonus::Protection, value: 5.0 },
        );
        let hazard = tile_at(&mut state, pos, "Selfishness", TileKind::Negative);
        state.positive_tiles.push(shield);
        state.negative_tiles.push(hazard);

        resolve_collisions(&mut state);

        assert!(state.positive_tiles.is_empty());
        assert!(state.player.is_protected);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.game_over_reason, "Selfishness");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut state = playing();
        let pos = state.player.pos;
        let hazard = tile_at(&mut state, pos, "Cheating", TileKind::Negative);
        state.negative_tiles.push(hazard);

        resolve_collisions(&mut state);
        let events_after_first = state.pending_events().len();
        resolve_collisions(&mut state);

        assert_eq!(state.pending_events().len(), events_after_first);
        assert_eq!(state.game_over_reason, "Cheating");
    }

    #[test]
    fn test_distant_tiles_ignored() {
        let mut state = playing();
        let tile = tile_at(&mut state, Vec2::new(0.0, 0.0), "Lying", TileKind::Negative);
        state.negative_tiles.push(tile);

        resolve_collisions(&mut state);

        assert_eq!(state.phase, GamePhase::Playing);
    }
}
