//! Game state and core simulation types
//!
//! The engine owns everything here exclusively. Entities are small value
//! types: each tick produces replacement values instead of mutating
//! positions and velocities in place.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::input::Direction;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, waiting for start
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended; only `restart` leaves this phase
    Ended,
}

/// Width and height of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn square(size: f32) -> Self {
        Self::new(size, size)
    }
}

/// The player's avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Dimensions,
    pub is_jumping: bool,
    pub is_protected: bool,
    /// Remaining shield time in milliseconds (>= 0)
    pub protection_ms: f32,
}

impl Player {
    /// Fresh player standing on the ground, centered
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.canvas_width / 2.0 - tuning.player_width / 2.0,
                tuning.ground_y(),
            ),
            vel: Vec2::ZERO,
            size: Dimensions::new(tuning.player_width, tuning.player_height),
            is_jumping: false,
            is_protected: false,
            protection_ms: 0.0,
        }
    }

    /// Player after applying a movement intent.
    ///
    /// Horizontal momentum is kept mid-air when no direction is held.
    /// Jumping is ignored while already airborne.
    pub fn with_direction(self, direction: Direction, tuning: &Tuning) -> Self {
        let mut vel = self.vel;
        let mut is_jumping = self.is_jumping;

        vel.x = match direction {
            Direction::Left => -tuning.player_speed,
            Direction::Right => tuning.player_speed,
            _ if self.is_jumping => self.vel.x,
            _ => 0.0,
        };

        if direction == Direction::Jump && !self.is_jumping {
            vel.y = -tuning.jump_force;
            is_jumping = true;
        }

        Self {
            vel,
            is_jumping,
            ..self
        }
    }

    /// Player after `dt` ticks of gravity and movement
    pub fn advanced(self, dt: f32, tuning: &Tuning) -> Self {
        let mut vel = self.vel;
        if self.is_jumping {
            vel.y += tuning.gravity * dt;
        }

        let next = self.pos + vel * dt;
        let max_x = tuning.canvas_width - self.size.width;
        let x = next.x.clamp(0.0, max_x);

        // Land only while falling or resting; a jump still rising stays airborne
        let ground = tuning.ground_y();
        let (y, is_jumping) = if next.y >= ground && vel.y >= 0.0 {
            vel.y = 0.0;
            (ground, false)
        } else {
            (next.y, self.is_jumping)
        };

        Self {
            pos: Vec2::new(x, y),
            vel,
            is_jumping,
            ..self
        }
    }

    /// Player with a fresh shield (replaces any running timer)
    pub fn shielded(self, duration_ms: f32) -> Self {
        let protection_ms = duration_ms.max(0.0);
        Self {
            is_protected: protection_ms > 0.0,
            protection_ms,
            ..self
        }
    }

    /// Player after draining `drain_ms` from the shield
    pub fn drained(self, drain_ms: f32) -> Self {
        if !self.is_protected {
            return self;
        }
        let left = self.protection_ms - drain_ms;
        if left <= 0.0 {
            Self {
                is_protected: false,
                protection_ms: 0.0,
                ..self
            }
        } else {
            Self {
                protection_ms: left,
                ..self
            }
        }
    }
}

/// Effect granted by a positive tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bonus {
    /// Adds survival time
    Time,
    /// Temporary invulnerability
    Protection,
}

/// Tile variant tag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TileKind {
    /// Collected on contact; `value` is in seconds
    Positive { bonus: Bonus, value: f32 },
    /// Fatal on contact unless shielded
    Negative,
}

impl TileKind {
    pub fn is_positive(&self) -> bool {
        matches!(self, TileKind::Positive { .. })
    }
}

/// A falling labeled tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Dimensions,
    pub label: String,
    pub color: String,
    pub kind: TileKind,
}

impl Tile {
    /// Tile after `dt` ticks: drift with wall bounce, then fall acceleration
    pub fn advanced(self, dt: f32, accel: f32, tuning: &Tuning) -> Self {
        let next = self.pos + self.vel * dt;
        let max_x = tuning.canvas_width - self.size.width;

        let mut vel = self.vel;
        let mut x = next.x;
        if x < 0.0 || x > max_x {
            vel.x = -vel.x;
            x = x.clamp(0.0, max_x);
        }
        vel.y = (vel.y + accel * dt).min(tuning.max_tile_fall_speed);

        Self {
            pos: Vec2::new(x, next.y),
            vel,
            ..self
        }
    }

    /// Whether the tile has scrolled past the bottom edge
    pub fn is_off_screen(&self, tuning: &Tuning) -> bool {
        self.pos.y >= tuning.canvas_height
    }
}

/// Discrete happenings the host reacts to (audio, UI)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    /// A positive tile was consumed
    PositiveCollected { tile_id: u32, label: String, bonus: Bonus },
    /// An unshielded player touched a negative tile
    FatalCollision { tile_id: u32, label: String },
    /// The run ended, by collision or by request
    RunEnded { reason: String, survived_ms: i64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawner randomness
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// Live positive tiles in spawn order
    pub positive_tiles: Vec<Tile>,
    /// Live negative tiles in spawn order
    pub negative_tiles: Vec<Tile>,
    /// Epoch ms the run started (rewound by time bonuses); `None` when not running
    pub start_time: Option<i64>,
    /// Epoch ms of the last spawn
    pub last_spawn_time: i64,
    /// Current minimum interval between spawns (ms)
    pub spawn_rate_ms: f64,
    pub is_game_over: bool,
    /// Label of the tile that ended the run
    pub game_over_reason: String,
    /// Clock reading at game over; freezes elapsed time
    pub ended_at: Option<i64>,
    /// `now` of the most recent tick
    pub last_now: Option<i64>,
    /// Events not yet drained by the host
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state with the given tuning.
    ///
    /// The tuning must already pass [`Tuning::validate`]; out-of-range
    /// probabilities make the spawner panic.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "unvalidated tuning: {:?}", tuning.validate());
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::spawn(&tuning),
            spawn_rate_ms: tuning.initial_spawn_rate_ms,
            tuning,
            phase: GamePhase::Ready,
            positive_tiles: Vec::new(),
            negative_tiles: Vec::new(),
            start_time: None,
            last_spawn_time: 0,
            is_game_over: false,
            game_over_reason: String::new(),
            ended_at: None,
            last_now: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset entities and timers, then begin playing
    pub fn start(&mut self, now: i64) {
        self.reset_run();
        self.start_time = Some(now);
        self.last_now = Some(now);
        self.phase = GamePhase::Playing;
        self.emit(GameEvent::RunStarted);
        log::info!("Run started (seed {})", self.seed);
    }

    /// Reset entities and timers, back to the ready screen
    pub fn restart(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Ready;
        log::info!("Run reset");
    }

    /// End the run with the given reason. No-op once already ended.
    pub fn end(&mut self, reason: &str) {
        if self.phase == GamePhase::Ended {
            return;
        }
        self.phase = GamePhase::Ended;
        self.is_game_over = true;
        self.game_over_reason = reason.to_string();
        self.ended_at = self.last_now;

        let survived_ms = self.elapsed_ms(self.last_now.unwrap_or(0));
        log::info!("Run ended by {:?} after {} ms", reason, survived_ms);
        self.emit(GameEvent::RunEnded {
            reason: reason.to_string(),
            survived_ms,
        });
    }

    /// Milliseconds survived so far (0 before start; frozen once ended)
    pub fn elapsed_ms(&self, now: i64) -> i64 {
        match self.start_time {
            Some(start) => (self.ended_at.unwrap_or(now) - start).max(0),
            None => 0,
        }
    }

    /// All live tiles, positives first, each in spawn order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.positive_tiles.iter().chain(self.negative_tiles.iter())
    }

    pub fn tile_count(&self) -> usize {
        self.positive_tiles.len() + self.negative_tiles.len()
    }

    /// Queue an event for the host
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn reset_run(&mut self) {
        self.player = Player::spawn(&self.tuning);
        self.positive_tiles.clear();
        self.negative_tiles.clear();
        self.start_time = None;
        self.last_spawn_time = 0;
        self.spawn_rate_ms = self.tuning.initial_spawn_rate_ms;
        self.is_game_over = false;
        self.game_over_reason.clear();
        self.ended_at = None;
        self.last_now = None;
        self.next_id = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unvalidated tuning")]
    fn test_rejects_out_of_range_tuning() {
        let tuning = Tuning {
            positive_chance: 1.5,
            ..Default::default()
        };
        GameState::with_tuning(1, tuning);
    }

    #[test]
    fn test_player_spawns_bottom_center() {
        let tuning = Tuning::default();
        let player = Player::spawn(&tuning);
        assert_eq!(player.pos, Vec2::new(380.0, 530.0));
        assert!(!player.is_jumping);
        assert!(!player.is_protected);
    }

    #[test]
    fn test_jump_ignored_mid_air() {
        let tuning = Tuning::default();
        let player = Player::spawn(&tuning).with_direction(Direction::Jump, &tuning);
        assert!(player.is_jumping);
        assert_eq!(player.vel.y, -15.0);

        let airborne = player.advanced(1.0, &tuning);
        let again = airborne.with_direction(Direction::Jump, &tuning);
        assert_eq!(again.vel.y, airborne.vel.y);
    }

    #[test]
    fn test_momentum_kept_only_in_air() {
        let tuning = Tuning::default();
        let grounded = Player::spawn(&tuning)
            .with_direction(Direction::Right, &tuning)
            .with_direction(Direction::Idle, &tuning);
        assert_eq!(grounded.vel.x, 0.0);

        let mut airborne = Player::spawn(&tuning).with_direction(Direction::Jump, &tuning);
        airborne = airborne.with_direction(Direction::Left, &tuning);
        airborne = airborne.with_direction(Direction::Idle, &tuning);
        assert_eq!(airborne.vel.x, -5.0);
    }

    #[test]
    fn test_jump_lands_back_on_ground() {
        let tuning = Tuning::default();
        let mut player = Player::spawn(&tuning).with_direction(Direction::Jump, &tuning);
        for _ in 0..100 {
            player = player.advanced(1.0, &tuning);
        }
        assert!(!player.is_jumping);
        assert_eq!(player.pos.y, tuning.ground_y());
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_player_clamped_to_canvas() {
        let tuning = Tuning::default();
        let mut player = Player::spawn(&tuning).with_direction(Direction::Left, &tuning);
        for _ in 0..200 {
            player = player.advanced(1.0, &tuning);
        }
        assert_eq!(player.pos.x, 0.0);

        player = player.with_direction(Direction::Right, &tuning);
        for _ in 0..400 {
            player = player.advanced(1.0, &tuning);
        }
        assert_eq!(player.pos.x, tuning.canvas_width - tuning.player_width);
    }

    #[test]
    fn test_shield_overwrites_and_drains() {
        let player = Player::spawn(&Tuning::default()).shielded(5000.0).shielded(3000.0);
        assert!(player.is_protected);
        assert_eq!(player.protection_ms, 3000.0);

        let player = player.drained(2000.0);
        assert_eq!(player.protection_ms, 1000.0);
        let player = player.drained(1500.0);
        assert!(!player.is_protected);
        assert_eq!(player.protection_ms, 0.0);
    }

    #[test]
    fn test_tile_bounces_off_walls() {
        let tuning = Tuning::default();
        let tile = Tile {
            id: 1,
            pos: Vec2::new(1.0, 0.0),
            vel: Vec2::new(-2.0, 3.0),
            size: Dimensions::square(40.0),
            label: "Lying".into(),
            color: "#B91C1C".into(),
            kind: TileKind::Negative,
        };
        let moved = tile.advanced(1.0, 0.02, &tuning);
        assert_eq!(moved.pos.x, 0.0);
        assert_eq!(moved.vel.x, 2.0);
        assert_eq!(moved.pos.y, 3.0);
        assert!((moved.vel.y - 3.02).abs() < 1e-6);
    }

    #[test]
    fn test_tile_fall_speed_capped() {
        let tuning = Tuning::default();
        let tile = Tile {
            id: 1,
            pos: Vec2::new(100.0, 0.0),
            vel: Vec2::new(0.0, 5.999),
            size: Dimensions::square(40.0),
            label: "Kindness".into(),
            color: "#22C55E".into(),
            kind: TileKind::Positive {
                bonus: Bonus::Time,
                value: 5.0,
            },
        };
        let moved = tile.advanced(10.0, 0.01, &tuning);
        assert_eq!(moved.vel.y, tuning.max_tile_fall_speed);
    }

    #[test]
    fn test_elapsed_before_start_is_zero() {
        let state = GameState::new(1);
        assert_eq!(state.elapsed_ms(123_456), 0);
    }

    #[test]
    fn test_end_freezes_elapsed() {
        let mut state = GameState::new(1);
        state.start(10_000);
        state.last_now = Some(12_500);
        state.end("Cheating");
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.elapsed_ms(99_000), 2_500);

        // A second end keeps the first reason
        state.end("Lying");
        assert_eq!(state.game_over_reason, "Cheating");
    }

    #[test]
    fn test_start_emits_and_resets() {
        let mut state = GameState::new(7);
        state.start(1_000);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.start_time, Some(1_000));
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);
        assert!(state.pending_events().is_empty());
    }
}
