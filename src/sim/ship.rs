//! The player's ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{heading_vector, wrap_position};

/// The player's ship (singleton per session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Degrees, 0 = up, clockwise positive
    pub heading: f32,
    pub scale: f32,
    /// px/s along heading
    pub speed: f32,
    /// Seconds of crash immunity left (0 = vulnerable)
    pub invincible_time: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self::new(Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0))
    }
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            heading: 0.0,
            scale: 1.0,
            speed: 0.0,
            invincible_time: 0.0,
        }
    }

    pub fn accelerate(&mut self) {
        if self.speed < MAX_SPEED {
            self.speed += LINEAR_ACC;
        }
    }

    pub fn decelerate(&mut self) {
        self.speed = (self.speed - LINEAR_ACC).max(0.0);
    }

    /// Counter-clockwise
    pub fn turn_left(&mut self) {
        self.heading -= ANGLE_ACC;
    }

    /// Clockwise
    pub fn turn_right(&mut self) {
        self.heading += ANGLE_ACC;
    }

    /// Start a fresh invincibility window
    pub fn just_hit(&mut self, invincible_secs: f32) {
        self.invincible_time = invincible_secs;
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_time > 0.0
    }

    /// Whether the ship is in the "on" half of its invincibility blink
    pub fn is_flash_visible(&self) -> bool {
        if !self.is_invincible() {
            return true;
        }
        let phase = (self.invincible_time * SHIP_FLASH_FREQUENCY * 2.0).floor() as i64;
        phase % 2 == 0
    }

    /// Advance one tick: integrate, wrap, decay invincibility
    pub fn update(&mut self, dt: f32) {
        self.pos = wrap_position(self.pos + heading_vector(self.heading) * self.speed * dt);
        if self.invincible_time > 0.0 {
            self.invincible_time = (self.invincible_time - dt).max(0.0);
        }
    }
}
