//! Blasteroids - a fixed-tick asteroid shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity clusters, collisions, level flow)
//! - `renderer`: Presentation contract and line-art draw phase
//! - `platform`: Keyboard sampling for the fixed tick
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play-field dimensions (logical px)
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 960.0;

    /// Game ticks per second
    pub const TICK_RATE: u32 = 30;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Max ticks per frame to catch up (prevents spiral of death)
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ship turn per held tick (degrees)
    pub const ANGLE_ACC: f32 = 5.0;
    /// Ship speed change per held tick (px/s)
    pub const LINEAR_ACC: f32 = 10.0;
    /// Ship top speed (px/s)
    pub const MAX_SPEED: f32 = 150.0;
    /// Invincibility granted after a crash (seconds)
    pub const SHIP_INVINCIBLE_TIME: f32 = 2.0;
    /// Blink rate while invincible (Hz)
    pub const SHIP_FLASH_FREQUENCY: f32 = 4.0;
    /// Ship bounding box half-extent before scale
    pub const SHIP_HALF_EXTENT: f32 = 11.0;

    pub const INITIAL_LIVES: u32 = 3;
    pub const LIFE_COUNTER_X: f32 = 50.0;
    pub const LIFE_COUNTER_Y: f32 = 100.0;
    pub const LIFE_COUNTER_SCALE: f32 = 1.5;
    pub const LIFE_COUNTER_PADDING: f32 = 25.0;

    pub const SCORE_STEP: u64 = 100;
    pub const SCORE_X: f32 = 5.0;
    pub const SCORE_Y: f32 = 5.0;
    pub const SCORE_SCALE: f32 = 5.0;

    /// Blast dash length before scale
    pub const BLAST_LENGTH: f32 = 10.0;
    pub const BLAST_WIDTH: f32 = 1.5;
    /// Blasts fly at three times the ship's top speed
    pub const BLAST_SPEED: f32 = MAX_SPEED * 3.0;
    /// Where an expired blast is parked until it is removed
    pub const BLAST_SENTINEL: f32 = -10.0;

    /// Random asteroids get a life in [1, ASTEROID_BASE_LIFE)
    pub const ASTEROID_BASE_LIFE: i32 = 3;
    pub const ASTEROID_MAX_SPEED: f32 = 200.0;
    /// Degrees per tick
    pub const ASTEROID_MAX_ROT_SPEED: f32 = 20.0;
    pub const ASTEROID_INIT_NUMBER: u32 = 10;
    pub const ASTEROIDS_PER_LEVEL: u32 = 3;
    pub const ASTEROID_SCALE_MIN: f32 = 0.5;
    pub const ASTEROID_SCALE_MAX: f32 = 3.0;
    pub const ASTEROID_SPLIT_DEGREE: f32 = 45.0;
    pub const ASTEROID_SCALE_FACTOR_WHEN_HIT: f32 = 1.5;
    /// Asteroid bounding box half-extent before scale
    pub const ASTEROID_HALF_EXTENT: f32 = 25.0;

    /// Overlay display countdowns (seconds)
    pub const LEVEL_NUMBER_COUNTDOWN: f32 = 1.0;
    pub const LEVEL_START_COUNTDOWN: f32 = 1.0;
    pub const LEVEL_WIN_COUNTDOWN: f32 = 1.0;
}

/// Degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Fold an angle in degrees into [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    wrap_coordinate(degrees, 360.0)
}

/// Toroidal wrap of one coordinate into [0, dimension)
///
/// `rem_euclid` can round up to exactly `dimension` for tiny negative inputs,
/// which is folded back to 0.
#[inline]
pub fn wrap_coordinate(value: f32, dimension: f32) -> f32 {
    let wrapped = value.rem_euclid(dimension);
    if wrapped >= dimension { 0.0 } else { wrapped }
}

/// Wrap a position onto the play-field torus
#[inline]
pub fn wrap_position(pos: Vec2) -> Vec2 {
    Vec2::new(
        wrap_coordinate(pos.x, consts::FIELD_WIDTH),
        wrap_coordinate(pos.y, consts::FIELD_HEIGHT),
    )
}

/// Unit vector for a heading in degrees
///
/// 0° points up, angles grow clockwise, screen y grows downward.
#[inline]
pub fn heading_vector(heading_deg: f32) -> Vec2 {
    let rad = deg_to_rad(heading_deg);
    Vec2::new(rad.sin(), -rad.cos())
}

/// Whether a point lies inside the play-field (edges included)
#[inline]
pub fn in_field(pos: Vec2) -> bool {
    pos.x >= 0.0 && pos.x <= consts::FIELD_WIDTH && pos.y >= 0.0 && pos.y <= consts::FIELD_HEIGHT
}
