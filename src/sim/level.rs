//! Level progression and the game status machine
//!
//! Per level the status runs
//! `NewLevelNumber -> LevelStart -> InGamePlay -> LevelWin -> NextLevel`,
//! and `NextLevel` rolls over into the next level's `NewLevelNumber`.
//! `GameOver` can be entered from any status and is never left.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// "LEVEL n" overlay
    NewLevelNumber,
    /// "START" overlay
    LevelStart,
    /// Active play, watching for a cleared field
    InGamePlay,
    /// "YOU WIN!" overlay
    LevelWin,
    /// One-shot: build the next level
    NextLevel,
    /// Out of lives (terminal)
    GameOver,
}

/// Which subsystems run while a status is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Systems {
    /// Tick the status countdown
    pub countdown: bool,
    /// Check for an emptied asteroid field
    pub win_check: bool,
    /// Crash and hit detection with their responses
    pub collisions: bool,
    /// Build the next level this tick
    pub advance_level: bool,
    /// Respond to player input
    pub input: bool,
    /// Draw the ship
    pub draw_ship: bool,
    /// Integrate positions
    pub movement: bool,
}

impl GameStatus {
    /// The status that follows when this one finishes
    pub fn next(self) -> GameStatus {
        match self {
            GameStatus::NewLevelNumber => GameStatus::LevelStart,
            GameStatus::LevelStart => GameStatus::InGamePlay,
            GameStatus::InGamePlay => GameStatus::LevelWin,
            GameStatus::LevelWin => GameStatus::NextLevel,
            GameStatus::NextLevel => GameStatus::NewLevelNumber,
            GameStatus::GameOver => GameStatus::GameOver,
        }
    }

    /// Subsystems active in this status
    ///
    /// Movement never stops, even after game over; only input and ship
    /// drawing are gated there.
    pub fn systems(self) -> Systems {
        match self {
            GameStatus::NewLevelNumber | GameStatus::LevelStart | GameStatus::LevelWin => Systems {
                countdown: true,
                win_check: false,
                collisions: true,
                advance_level: false,
                input: true,
                draw_ship: true,
                movement: true,
            },
            GameStatus::InGamePlay => Systems {
                countdown: false,
                win_check: true,
                collisions: true,
                advance_level: false,
                input: true,
                draw_ship: true,
                movement: true,
            },
            GameStatus::NextLevel => Systems {
                countdown: false,
                win_check: false,
                collisions: false,
                advance_level: true,
                input: true,
                draw_ship: true,
                movement: true,
            },
            GameStatus::GameOver => Systems {
                countdown: false,
                win_check: false,
                collisions: false,
                advance_level: false,
                input: false,
                draw_ship: false,
                movement: true,
            },
        }
    }

    /// Overlay text for this status, if any
    pub fn banner(self, level_number: u32) -> Option<String> {
        match self {
            GameStatus::NewLevelNumber => Some(format!("LEVEL {level_number}")),
            GameStatus::LevelStart => Some("START".to_string()),
            GameStatus::LevelWin => Some("YOU WIN!".to_string()),
            GameStatus::GameOver => Some("GAME OVER".to_string()),
            GameStatus::InGamePlay | GameStatus::NextLevel => None,
        }
    }
}

/// Seconds left on each overlay status
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdowns {
    pub new_level_number: f32,
    pub level_start: f32,
    pub level_win: f32,
}

impl Countdowns {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            new_level_number: tuning.level_number_secs,
            level_start: tuning.level_start_secs,
            level_win: tuning.level_win_secs,
        }
    }

    /// Countdown owned by `status`, if it has one
    pub fn get_mut(&mut self, status: GameStatus) -> Option<&mut f32> {
        match status {
            GameStatus::NewLevelNumber => Some(&mut self.new_level_number),
            GameStatus::LevelStart => Some(&mut self.level_start),
            GameStatus::LevelWin => Some(&mut self.level_win),
            _ => None,
        }
    }
}

/// Asteroids a level starts with
pub fn asteroid_count_for_level(level_number: u32, tuning: &Tuning) -> u32 {
    tuning.asteroid_init_number + level_number.saturating_sub(1) * tuning.asteroids_per_level
}

/// Level number, its asteroid budget and the status machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub level_number: u32,
    pub asteroid_total: u32,
    pub status: GameStatus,
    pub countdowns: Countdowns,
}

impl Level {
    /// Level 1, showing its number
    pub fn first(tuning: &Tuning) -> Self {
        Self::init(1, tuning)
    }

    fn init(level_number: u32, tuning: &Tuning) -> Self {
        Self {
            level_number,
            asteroid_total: asteroid_count_for_level(level_number, tuning),
            status: GameStatus::NewLevelNumber,
            countdowns: Countdowns::from_tuning(tuning),
        }
    }

    /// Re-initialize as the following level
    ///
    /// The asteroid budget is recomputed from the level number, not carried
    /// over from whatever was left.
    pub fn go_next(&mut self, tuning: &Tuning) {
        *self = Self::init(self.level_number + 1, tuning);
        log::info!(
            "level {} begins with {} asteroids",
            self.level_number,
            self.asteroid_total
        );
    }

    /// Count down the active overlay status
    ///
    /// A countdown still above zero is decremented by `dt`. Once it has run
    /// out the status advances; the consumed value stays at zero until the
    /// next level re-initializes it. Returns the new status on a change.
    pub fn tick(&mut self, dt: f32) -> Option<GameStatus> {
        let status = self.status;
        let remaining = self.countdowns.get_mut(status)?;
        if *remaining > 0.0 {
            *remaining -= dt;
            return None;
        }
        *remaining = 0.0;
        self.status = status.next();
        log::debug!("status {:?} -> {:?}", status, self.status);
        Some(self.status)
    }

    pub fn win(&mut self) {
        if self.status == GameStatus::InGamePlay {
            self.status = GameStatus::LevelWin;
            log::info!("level {} cleared", self.level_number);
        }
    }

    pub fn game_over(&mut self) {
        if self.status != GameStatus::GameOver {
            self.status = GameStatus::GameOver;
            log::info!("game over on level {}", self.level_number);
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
