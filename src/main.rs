//! Blasteroids headless runner
//!
//! Drives a full session at the fixed tick with a scripted pilot standing in
//! for the keyboard, rendering every frame into a line batch.

use blasteroids::consts::*;
use blasteroids::platform::{Key, KeyLatch};
use blasteroids::renderer::{LineBatch, draw_frame};
use blasteroids::sim::tick::is_finished;
use blasteroids::sim::{GameState, tick};
use blasteroids::{Tuning, TuningError};

const SEED: u64 = 0x5EED_B1A5;
/// Display refresh the runner pretends to have
const FRAME_DT: f32 = 1.0 / 60.0;
/// Stop after five minutes of game time
const TICK_BUDGET: u64 = TICK_RATE as u64 * 300;

/// Deterministic stand-in for a player: spins, thrusts in bursts, taps fire
struct Pilot;

impl Pilot {
    fn drive(&self, latch: &mut KeyLatch, tick: u64) {
        set(latch, Key::Right, tick % 90 < 60);
        set(latch, Key::Left, tick % 90 >= 75);
        set(latch, Key::Up, tick % 120 < 10);
        set(latch, Key::Down, (40..55).contains(&(tick % 120)));

        // A tap that lands entirely between two ticks
        if tick % 3 == 0 {
            latch.key_down(Key::Fire);
            latch.key_up(Key::Fire);
        }
    }
}

fn set(latch: &mut KeyLatch, key: Key, held: bool) {
    if held {
        latch.key_down(key);
    } else {
        latch.key_up(key);
    }
}

/// Session plus the frame-to-tick accumulator
struct Game {
    state: GameState,
    latch: KeyLatch,
    pilot: Pilot,
    batch: LineBatch,
    accumulator: f32,
    frames: u64,
}

impl Game {
    fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            latch: KeyLatch::new(),
            pilot: Pilot,
            batch: LineBatch::new(),
            accumulator: 0.0,
            frames: 0,
        }
    }

    /// Run simulation ticks owed for one frame, then draw it
    ///
    /// Returns false once the session should end.
    fn frame(&mut self, dt: f32) -> bool {
        self.accumulator += dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.pilot.drive(&mut self.latch, self.state.time_ticks);
            if self.latch.quit_requested() {
                log::info!("quit requested");
                return false;
            }
            let input = self.latch.sample();
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        self.batch.clear();
        draw_frame(&self.state, &mut self.batch);
        self.frames += 1;

        !is_finished(&self.state) && self.state.time_ticks < TICK_BUDGET
    }
}

fn main() -> Result<(), TuningError> {
    env_logger::init();
    log::info!("Blasteroids (headless) starting...");

    let tuning = Tuning::default();
    tuning.validate()?;
    log::debug!("tuning: {}", tuning.to_json()?);

    let mut game = Game::new(SEED, tuning);
    while game.frame(FRAME_DT) {}

    let state = &game.state;
    log::info!(
        "session over after {} ticks ({} frames): level {}, score {}, {} lives, {:?}",
        state.time_ticks,
        game.frames,
        state.level.level_number,
        state.score.value,
        state.lives.lives,
        state.status()
    );
    log::info!(
        "last frame: {} segments ({} bytes), {} text draws",
        game.batch.segment_count(),
        game.batch.as_bytes().len(),
        game.batch.texts().len()
    );
    Ok(())
}
