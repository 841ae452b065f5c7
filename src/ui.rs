//! HUD readouts
//!
//! Pure formatting of snapshot values. Drawing them is the host's job.

use serde::Serialize;

use crate::sim::{GamePhase, Snapshot};

/// `MM:SS` clock for a duration in milliseconds
pub fn format_clock(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Whole seconds of shield left, rounded up so "1s" shows until it expires
pub fn shield_seconds(protection_ms: f32) -> u32 {
    (protection_ms.max(0.0) / 1000.0).ceil() as u32
}

/// Final score: whole seconds survived
pub fn final_score(elapsed_ms: i64) -> u64 {
    (elapsed_ms.max(0) / 1000) as u64
}

/// Performance band shown on the game over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rating {
    Novice,
    Developing,
    Strong,
    Leader,
}

impl Rating {
    pub fn for_score(seconds: u64) -> Self {
        match seconds {
            0..30 => Rating::Novice,
            30..60 => Rating::Developing,
            60..120 => Rating::Strong,
            _ => Rating::Leader,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rating::Novice => "Keep practicing your integrity skills!",
            Rating::Developing => "Good job! Your moral compass is developing!",
            Rating::Strong => "Excellent! You've got strong values!",
            Rating::Leader => "Amazing! You're a true moral leader!",
        }
    }
}

/// Text the HUD and game over screen display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudReadout {
    pub clock: String,
    /// Present while shielded
    pub shield_seconds: Option<u32>,
    /// Present once the run has ended
    pub game_over: Option<GameOverReadout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOverReadout {
    pub reason: String,
    pub score: u64,
    pub rating: Rating,
    pub message: &'static str,
}

impl HudReadout {
    pub fn from_snapshot(snap: &Snapshot) -> Self {
        let shield_seconds = snap
            .player
            .is_protected
            .then(|| shield_seconds(snap.protection_ms));

        let game_over = (snap.phase == GamePhase::Ended).then(|| {
            let score = final_score(snap.elapsed_ms);
            let rating = Rating::for_score(score);
            GameOverReadout {
                reason: snap.game_over_reason.clone(),
                score,
                rating,
                message: rating.message(),
            }
        });

        Self {
            clock: format_clock(snap.elapsed_ms),
            shield_seconds,
            game_over,
        }
    }
}
