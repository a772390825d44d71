//! Blasts fired by the ship
//!
//! A blast flies straight at a fixed speed and lives until it leaves the
//! field. It never wraps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cluster::Cluster;
use super::ship::Ship;
use crate::consts::*;
use crate::{heading_vector, in_field};

/// Result of advancing a blast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlastStatus {
    Alive,
    /// Left the field; must be removed this tick
    Expired,
}

/// A single blast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blast {
    pub pos: Vec2,
    /// Degrees, 0 = up, clockwise positive
    pub heading: f32,
    pub speed: f32,
}

impl Blast {
    pub fn new(pos: Vec2, heading: f32) -> Self {
        Self {
            pos,
            heading,
            speed: BLAST_SPEED,
        }
    }

    /// Fired from the ship's current pose
    pub fn from_ship(ship: &Ship) -> Self {
        Self::new(ship.pos, ship.heading)
    }

    /// Far end of the dash
    pub fn tail(&self) -> Vec2 {
        self.pos + heading_vector(self.heading) * BLAST_LENGTH
    }

    /// Advance one tick
    ///
    /// The bounds check runs before moving, so a blast that crossed the edge
    /// last tick is reported expired before it can move again.
    pub fn update(&mut self, dt: f32) -> BlastStatus {
        if !in_field(self.pos) {
            self.pos = Vec2::splat(BLAST_SENTINEL);
            return BlastStatus::Expired;
        }
        self.pos += heading_vector(self.heading) * self.speed * dt;
        BlastStatus::Alive
    }
}

/// Move every blast and drop the ones that left the field
pub fn update_all(blasts: &mut Cluster<Blast>, dt: f32) {
    blasts.for_each_then(
        |blast| blast.update(dt),
        |blasts, handle, status| {
            if status == BlastStatus::Expired {
                blasts.remove(handle);
            }
        },
    );
}
