//! Browser facade
//!
//! JavaScript owns the canvas, audio and `requestAnimationFrame`; it forwards
//! key events and frame timestamps here and reads back JSON snapshots.

use wasm_bindgen::prelude::*;

use super::FrameClock;
use crate::input::{Direction, HeldKeys};
use crate::sim::{GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::ui::HudReadout;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
    }
}

fn to_js(e: serde_json::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// One game instance driven by the page
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    keys: HeldKeys,
    clock: FrameClock,
    /// Direction change waiting for the next frame
    pending: Option<Direction>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        log::info!("Game created with seed: {}", seed);
        WebGame {
            state: GameState::with_tuning(seed, Tuning::load()),
            keys: HeldKeys::new(),
            clock: FrameClock::new(),
            pending: None,
        }
    }

    pub fn start(&mut self) {
        self.state.start(js_sys::Date::now() as i64);
        self.clock.reset();
        // Keys held on the start screen take effect immediately
        let held = self.keys.direction();
        self.pending = (held != Direction::Idle).then_some(held);
    }

    pub fn restart(&mut self) {
        self.state.restart();
        self.clock.reset();
        self.pending = None;
    }

    pub fn end(&mut self, reason: &str) {
        self.state.end(reason);
    }

    pub fn key_down(&mut self, code: &str) {
        if let Some(direction) = self.keys.key_down(code) {
            self.pending = Some(direction);
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(direction) = self.keys.key_up(code) {
            self.pending = Some(direction);
        }
    }

    /// Window lost focus: release everything
    pub fn blur(&mut self) {
        if let Some(direction) = self.keys.clear() {
            self.pending = Some(direction);
        }
    }

    /// Advance one animation frame (`timestamp` from `requestAnimationFrame`)
    pub fn frame(&mut self, timestamp: f64) {
        if self.state.phase != GamePhase::Playing {
            self.clock.reset();
            return;
        }
        let Some(dt) = self.clock.frame(timestamp) else {
            return;
        };
        let input = TickInput {
            direction: self.pending.take(),
        };
        tick(&mut self.state, &input, dt, js_sys::Date::now() as i64);
    }

    pub fn is_playing(&self) -> bool {
        self.state.phase == GamePhase::Playing
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.state
            .snapshot(js_sys::Date::now() as i64)
            .to_json()
            .map_err(to_js)
    }

    pub fn hud_json(&self) -> Result<String, JsValue> {
        let snap = self.state.snapshot(js_sys::Date::now() as i64);
        serde_json::to_string(&HudReadout::from_snapshot(&snap)).map_err(to_js)
    }

    /// Events since the last call, for sound effects
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.drain_events()).map_err(to_js)
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
