//! Read-only view of the simulation for the renderer and HUD

use serde::Serialize;

use super::state::{GamePhase, GameState, Player, Tile};

/// Everything a frame needs to draw and label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub player: Player,
    pub positive_tiles: Vec<Tile>,
    pub negative_tiles: Vec<Tile>,
    /// Survival time in ms (includes time bonuses)
    pub elapsed_ms: i64,
    pub protection_ms: f32,
    pub game_over_reason: String,
    pub spawn_rate_ms: f64,
}

impl GameState {
    /// Capture the state as seen at `now`
    pub fn snapshot(&self, now: i64) -> Snapshot {
        Snapshot {
            phase: self.phase,
            player: self.player,
            positive_tiles: self.positive_tiles.clone(),
            negative_tiles: self.negative_tiles.clone(),
            elapsed_ms: self.elapsed_ms(now),
            protection_ms: self.player.protection_ms,
            game_over_reason: self.game_over_reason.clone(),
            spawn_rate_ms: self.spawn_rate_ms,
        }
    }
}

impl Snapshot {
    /// Serialize for a JavaScript host
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::try_spawn;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(12);
        state.start(1_000);
        try_spawn(&mut state, 2_000);

        let snap = state.snapshot(4_000);
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.elapsed_ms, 3_000);
        assert_eq!(snap.positive_tiles.len() + snap.negative_tiles.len(), 1);
        assert_eq!(snap.player, state.player);
    }

    #[test]
    fn test_snapshot_json_has_fields() {
        let state = GameState::new(12);
        let json = state.snapshot(0).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Ready");
        assert_eq!(value["player"]["is_protected"], false);
        assert!(value["positive_tiles"].as_array().unwrap().is_empty());
    }
}
