//! Virtue Fall entry point
//!
//! Natively this runs a headless, autopiloted session with a synthetic
//! 60 Hz frame driver and reports the result. The browser build is driven
//! from JavaScript through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use virtue_fall::Direction;
    use virtue_fall::consts::FRAME_MS;
    use virtue_fall::platform::FrameClock;
    use virtue_fall::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use virtue_fall::tuning::Tuning;
    use virtue_fall::ui::HudReadout;

    /// Give up after five simulated minutes
    const MAX_FRAMES: u32 = 5 * 60 * 60;
    /// How far above the player a falling negative counts as a threat
    const THREAT_RANGE: f32 = 220.0;
    const THREAT_MARGIN: f32 = 30.0;

    /// Dodge the closest negative overhead, otherwise chase a positive
    fn autopilot(state: &GameState) -> Direction {
        let player = &state.player;
        let left = player.pos.x;
        let right = left + player.size.width;
        let center = (left + right) / 2.0;

        let threat = state
            .negative_tiles
            .iter()
            .filter(|t| {
                let above = player.pos.y - (t.pos.y + t.size.height);
                above > -player.size.height
                    && above < THREAT_RANGE
                    && t.pos.x < right + THREAT_MARGIN
                    && t.pos.x + t.size.width > left - THREAT_MARGIN
            })
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        if let Some(tile) = threat {
            let tile_center = tile.pos.x + tile.size.width / 2.0;
            let max_x = state.tuning.canvas_width - player.size.width;
            let go_right = if left <= 0.0 {
                true
            } else if left >= max_x {
                false
            } else {
                tile_center < center
            };
            return if go_right { Direction::Right } else { Direction::Left };
        }

        let target = state
            .positive_tiles
            .iter()
            .filter(|t| t.pos.y > 0.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        match target {
            Some(tile) => {
                let tile_center = tile.pos.x + tile.size.width / 2.0;
                if tile_center < center - 10.0 {
                    Direction::Left
                } else if tile_center > center + 10.0 {
                    Direction::Right
                } else {
                    Direction::Idle
                }
            }
            None => Direction::Idle,
        }
    }

    pub fn run() {
        let tuning = Tuning::load();
        let epoch_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        let seed = std::env::var("VIRTUE_FALL_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(epoch_ms as u64);

        let mut state = GameState::with_tuning(seed, tuning);
        let mut clock = FrameClock::new();
        let mut last_direction = Direction::Idle;
        let mut collected = 0u32;

        state.start(epoch_ms);

        for frame in 0..MAX_FRAMES {
            let timestamp = frame as f64 * FRAME_MS as f64;
            let now = epoch_ms + timestamp as i64;
            let Some(dt) = clock.frame(timestamp) else {
                continue;
            };

            let wanted = autopilot(&state);
            let input = if wanted != last_direction {
                TickInput::steer(wanted)
            } else {
                TickInput::default()
            };
            last_direction = wanted;

            tick(&mut state, &input, dt, now);

            for event in state.drain_events() {
                match event {
                    GameEvent::PositiveCollected { label, bonus, .. } => {
                        collected += 1;
                        log::debug!("Collected {} ({:?})", label, bonus);
                    }
                    GameEvent::FatalCollision { label, .. } => {
                        log::debug!("Hit {}", label);
                    }
                    _ => {}
                }
            }

            if state.phase != GamePhase::Playing {
                break;
            }
        }

        let now = state.last_now.unwrap_or(epoch_ms);
        if state.phase == GamePhase::Playing {
            state.end("Time limit");
        }

        let hud = HudReadout::from_snapshot(&state.snapshot(now));
        println!("Seed: {}", seed);
        println!("Survived: {}", hud.clock);
        println!("Positives collected: {}", collected);
        if let Some(over) = hud.game_over {
            println!("Ended by: {}", over.reason);
            println!("Score: {} ({})", over.score, over.message);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Virtue Fall (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}
