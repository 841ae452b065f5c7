//! Platform abstraction layer
//!
//! The engine never schedules itself. Hosts call [`crate::sim::tick`] once per
//! animation frame; [`FrameClock`] turns their timestamps into deltas.
//! On `wasm32` the `web` facade wraps the engine for a JavaScript host.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Converts frame timestamps into normalized deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame in nominal 60 Hz ticks.
    ///
    /// The first frame after construction or [`reset`](Self::reset) only
    /// records its timestamp and returns `None`, so a long idle gap is never
    /// integrated. Timestamps going backward yield a zero delta.
    pub fn frame(&mut self, timestamp_ms: f64) -> Option<f32> {
        let previous = self.last.replace(timestamp_ms)?;
        let elapsed = (timestamp_ms - previous).max(0.0);
        Some(crate::ms_to_ticks(elapsed))
    }

    /// Forget the previous timestamp (call when leaving play)
    pub fn reset(&mut self) {
        self.last = None;
    }
}
