//! Fixed tile template tables
//!
//! Every label appears in English and Hindi with the same color and effect.

use super::state::{Bonus, TileKind};

/// A spawnable tile design
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileTemplate {
    pub label: &'static str,
    /// CSS hex color
    pub color: &'static str,
    pub kind: TileKind,
}

const fn positive(label: &'static str, color: &'static str, bonus: Bonus, value: f32) -> TileTemplate {
    TileTemplate {
        label,
        color,
        kind: TileKind::Positive { bonus, value },
    }
}

const fn negative(label: &'static str, color: &'static str) -> TileTemplate {
    TileTemplate {
        label,
        color,
        kind: TileKind::Negative,
    }
}

/// Beneficial tiles: time bonus or temporary shield
pub const POSITIVE_TILES: [TileTemplate; 16] = [
    positive("Kindness", "#22C55E", Bonus::Time, 5.0),
    positive("दयालुता", "#22C55E", Bonus::Time, 5.0),
    positive("Respect", "#10B981", Bonus::Time, 8.0),
    positive("सम्मान", "#10B981", Bonus::Time, 8.0),
    positive("Honesty", "#059669", Bonus::Protection, 5.0),
    positive("ईमानदारी", "#059669", Bonus::Protection, 5.0),
    positive("Courage", "#047857", Bonus::Time, 10.0),
    positive("साहस", "#047857", Bonus::Time, 10.0),
    positive("Integrity", "#065F46", Bonus::Protection, 5.0),
    positive("नैतिकता", "#065F46", Bonus::Protection, 5.0),
    positive("Patience", "#047857", Bonus::Time, 7.0),
    positive("धैर्य", "#047857", Bonus::Time, 7.0),
    positive("Empathy", "#059669", Bonus::Protection, 5.0),
    positive("सहानुभूति", "#059669", Bonus::Protection, 5.0),
    positive("Wisdom", "#10B981", Bonus::Time, 12.0),
    positive("बुद्धिमत्ता", "#10B981", Bonus::Time, 12.0),
];

/// Fatal tiles
pub const NEGATIVE_TILES: [TileTemplate; 16] = [
    negative("Bullying", "#DC2626"),
    negative("धमकाना", "#DC2626"),
    negative("Lying", "#B91C1C"),
    negative("झूठ बोलना", "#B91C1C"),
    negative("Cheating", "#991B1B"),
    negative("धोखा", "#991B1B"),
    negative("Peer Pressure", "#7F1D1D"),
    negative("साथियों का दबाव", "#7F1D1D"),
    negative("Plagiarism", "#EF4444"),
    negative("नकल", "#EF4444"),
    negative("Betrayal", "#4A90E2"),
    negative("विश्वासघात", "#4A90E2"),
    negative("Corruption", "#4A90E2"),
    negative("भ्रष्टाचार", "#4A90E2"),
    negative("Selfishness", "#4A90E2"),
    negative("स्वार्थ", "#4A90E2"),
];
