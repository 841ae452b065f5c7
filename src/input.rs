//! Keyboard state to player direction
//!
//! Keys are identified by DOM `KeyboardEvent.code` strings so the browser
//! host can forward events untouched.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Per-frame movement intent for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Jump,
    /// No horizontal intent (nothing held, or left and right cancel out)
    #[default]
    Idle,
}

/// Logical control a physical key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Jump,
}

/// Map a key code to its control (arrows, WASD, space)
pub fn control_for_code(code: &str) -> Option<Control> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Control::Left),
        "ArrowRight" | "KeyD" => Some(Control::Right),
        "ArrowUp" | "KeyW" | "Space" => Some(Control::Jump),
        _ => None,
    }
}

/// Resolve held controls into a single direction.
///
/// Jump wins over horizontal movement; left and right together cancel.
pub fn resolve(left: bool, right: bool, jump: bool) -> Direction {
    if jump {
        Direction::Jump
    } else if left && !right {
        Direction::Left
    } else if right && !left {
        Direction::Right
    } else {
        Direction::Idle
    }
}

/// Tracks which keys are down and reports direction changes
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    pressed: HashSet<String>,
    current: Direction,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns the new direction if it changed.
    pub fn key_down(&mut self, code: &str) -> Option<Direction> {
        self.pressed.insert(code.to_string());
        self.refresh()
    }

    /// Record a key release. Returns the new direction if it changed.
    pub fn key_up(&mut self, code: &str) -> Option<Direction> {
        self.pressed.remove(code);
        self.refresh()
    }

    /// Forget all held keys (focus loss)
    pub fn clear(&mut self) -> Option<Direction> {
        self.pressed.clear();
        self.refresh()
    }

    /// Direction implied by the currently held keys
    pub fn direction(&self) -> Direction {
        self.current
    }

    fn held(&self, control: Control) -> bool {
        self.pressed
            .iter()
            .any(|code| control_for_code(code) == Some(control))
    }

    fn refresh(&mut self) -> Option<Direction> {
        let next = resolve(
            self.held(Control::Left),
            self.held(Control::Right),
            self.held(Control::Jump),
        );
        if next == self.current {
            None
        } else {
            self.current = next;
            Some(next)
        }
    }
}
