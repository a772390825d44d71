//! Fixed timestep simulation tick
//!
//! One call runs the logic phase (input, status machine, collisions) and then
//! the movement phase. Collision response always lands before anything moves.

use super::blast;
use super::collision::{asteroid_hit_detection, ship_crash_detection};
use super::level::GameStatus;
use super::state::GameState;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub accelerate: bool,
    pub decelerate: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Spawns a blast on every tick it is held
    pub fire: bool,
}

impl TickInput {
    pub fn is_idle(&self) -> bool {
        *self == TickInput::default()
    }
}

/// Advance the game state by one fixed timestep
///
/// The subsystem table is read once from the status at the start of the tick,
/// so a status entered mid-tick only takes effect on the next one.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let status = state.status();
    let systems = status.systems();

    // === Logic ===
    if systems.input {
        apply_input(state, input);
    }

    if systems.advance_level {
        state.advance_level();
    }

    if systems.win_check && state.asteroids.is_empty() {
        state.level.win();
    }

    if systems.countdown {
        state.level.tick(dt);
    }

    if systems.collisions {
        handle_collisions(state);
    }

    // === Movement ===
    if systems.movement {
        blast::update_all(&mut state.blasts, dt);
        state.asteroids.for_each(|asteroid| asteroid.update(dt));
        state.ship.update(dt);
    }

    state.time_ticks += 1;

    state.check_clusters();

    if state.status() != status {
        log::debug!(
            "tick {}: {:?} -> {:?}",
            state.time_ticks,
            status,
            state.status()
        );
    }
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    if input.accelerate {
        state.ship.accelerate();
    }
    if input.decelerate {
        state.ship.decelerate();
    }
    if input.turn_left {
        state.ship.turn_left();
    }
    if input.turn_right {
        state.ship.turn_right();
    }
    if input.fire {
        state.fire();
    }
}

/// Crash check, then blast hits and scoring
fn handle_collisions(state: &mut GameState) {
    let invincible_secs = state.tuning.ship_invincible_secs;
    if ship_crash_detection(&state.asteroids, &mut state.ship, invincible_secs) {
        let remaining = state.lives.lose_one();
        log::info!("ship destroyed, {remaining} lives left");
        if remaining == 0 {
            state.level.game_over();
        }
    }

    let rule = state.tuning.split_rule();
    let earned = asteroid_hit_detection(
        &mut state.asteroids,
        &mut state.blasts,
        rule,
        state.tuning.score_step,
    );
    if earned > 0 {
        state.score.change(i64::try_from(earned).unwrap_or(i64::MAX));
    }
}

/// Whether the session has ended
pub fn is_finished(state: &GameState) -> bool {
    state.status() == GameStatus::GameOver
}
