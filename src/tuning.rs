//! Game balance tuning
//!
//! Every knob the simulation reads lives here. Defaults come from
//! [`crate::consts`]; overrides are loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable naming a JSON tuning file (native only)
pub const TUNING_ENV_VAR: &str = "VIRTUE_FALL_TUNING";

/// Tuning load/validation errors
#[derive(Debug)]
pub enum TuningError {
    /// Tuning file could not be read
    Io(std::io::Error),
    /// Tuning JSON was malformed
    Parse(serde_json::Error),
    /// A value is out of its allowed range
    Invalid { field: &'static str, reason: String },
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Failed to read tuning file: {}", e),
            Self::Parse(e) => write!(f, "Failed to parse tuning JSON: {}", e),
            Self::Invalid { field, reason } => write!(f, "Invalid tuning `{}`: {}", field, reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal speed (px per tick)
    pub player_speed: f32,
    /// Initial upward velocity of a jump (px per tick)
    pub jump_force: f32,
    /// Downward acceleration while airborne (px per tick²)
    pub gravity: f32,
    pub ground_margin: f32,

    // === Tiles ===
    pub tile_size: f32,
    pub max_tile_fall_speed: f32,
    pub min_fall_speed: f32,
    pub drift_speed_min: f32,
    pub drift_speed_max: f32,
    pub positive_tile_accel: f32,
    pub negative_tile_accel: f32,

    // === Spawner / difficulty ===
    pub initial_spawn_rate_ms: f64,
    pub min_spawn_rate_ms: f64,
    /// Spawn interval shrinks by `difficulty_rate * 1000` ms per elapsed second
    pub difficulty_rate: f64,
    pub overlap_prevention_distance: f32,
    pub spawn_attempts: u32,
    pub positive_chance: f64,
    pub horizontal_move_chance: f64,

    // === Timers ===
    pub protection_drain_ms_per_tick: f32,
    pub max_frame_delta: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            jump_force: PLAYER_JUMP_FORCE,
            gravity: GRAVITY,
            ground_margin: GROUND_MARGIN,

            tile_size: TILE_SIZE,
            max_tile_fall_speed: MAX_TILE_FALL_SPEED,
            min_fall_speed: MIN_TILE_FALL_SPEED,
            drift_speed_min: TILE_DRIFT_SPEED_MIN,
            drift_speed_max: TILE_DRIFT_SPEED_MAX,
            positive_tile_accel: POSITIVE_TILE_ACCEL,
            negative_tile_accel: NEGATIVE_TILE_ACCEL,

            initial_spawn_rate_ms: INITIAL_SPAWN_RATE_MS,
            min_spawn_rate_ms: MIN_SPAWN_RATE_MS,
            difficulty_rate: DIFFICULTY_RATE,
            overlap_prevention_distance: OVERLAP_PREVENTION_DISTANCE,
            spawn_attempts: SPAWN_ATTEMPTS,
            positive_chance: POSITIVE_CHANCE,
            horizontal_move_chance: HORIZONTAL_MOVE_CHANCE,

            protection_drain_ms_per_tick: PROTECTION_DRAIN_MS_PER_TICK,
            max_frame_delta: MAX_FRAME_DELTA,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every knob against its allowed range
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> Result<(), TuningError> {
            Err(TuningError::Invalid {
                field,
                reason: reason.into(),
            })
        }

        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("tile_size", self.tile_size),
            ("max_tile_fall_speed", self.max_tile_fall_speed),
            ("max_frame_delta", self.max_frame_delta),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return invalid(field, format!("must be positive, got {}", value));
            }
        }

        let non_negative = [
            ("player_speed", self.player_speed),
            ("jump_force", self.jump_force),
            ("gravity", self.gravity),
            ("ground_margin", self.ground_margin),
            ("min_fall_speed", self.min_fall_speed),
            ("drift_speed_min", self.drift_speed_min),
            ("positive_tile_accel", self.positive_tile_accel),
            ("negative_tile_accel", self.negative_tile_accel),
            ("overlap_prevention_distance", self.overlap_prevention_distance),
            ("protection_drain_ms_per_tick", self.protection_drain_ms_per_tick),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(field, format!("must be non-negative, got {}", value));
            }
        }

        if self.player_width > self.canvas_width
            || self.player_height + self.ground_margin > self.canvas_height
        {
            return invalid("player_width", "player does not fit on the canvas");
        }
        if self.tile_size > self.canvas_width {
            return invalid("tile_size", "tiles are wider than the canvas");
        }
        if self.drift_speed_min > self.drift_speed_max {
            return invalid("drift_speed_max", "must be >= drift_speed_min");
        }
        if self.min_fall_speed >= self.max_tile_fall_speed {
            return invalid("min_fall_speed", "must be below max_tile_fall_speed");
        }

        if !(self.min_spawn_rate_ms.is_finite() && self.min_spawn_rate_ms >= 0.0) {
            return invalid("min_spawn_rate_ms", "must be non-negative");
        }
        if !(self.initial_spawn_rate_ms >= self.min_spawn_rate_ms) {
            return invalid("initial_spawn_rate_ms", "must be >= min_spawn_rate_ms");
        }
        if !(self.difficulty_rate.is_finite() && self.difficulty_rate >= 0.0) {
            return invalid("difficulty_rate", "must be non-negative");
        }
        if self.spawn_attempts == 0 {
            return invalid("spawn_attempts", "at least one attempt is required");
        }
        for (field, p) in [
            ("positive_chance", self.positive_chance),
            ("horizontal_move_chance", self.horizontal_move_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(field, format!("probability out of range: {}", p));
            }
        }

        Ok(())
    }

    /// Resting y of the player's top edge
    pub fn ground_y(&self) -> f32 {
        self.canvas_height - self.player_height - self.ground_margin
    }

    /// Load tuning from the file named by [`TUNING_ENV_VAR`] (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(TUNING_ENV_VAR) else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("{} - falling back to default tuning", e);
                Self::default()
            }
        }
    }

    /// Browser builds always use the compiled-in defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}
