//! Collision detection and response
//!
//! Every test is an axis-aligned box overlap. Boxes are rebuilt from the
//! entity's position and scale on each check and ignore rotation.

use glam::Vec2;

use super::asteroid::{Asteroid, HitOutcome, SplitRule, hit_and_split};
use super::blast::Blast;
use super::cluster::Cluster;
use super::ship::Ship;
use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box spanning two arbitrary corners
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Square box centred on `center`
    pub fn square(center: Vec2, half_extent: f32) -> Self {
        let half = Vec2::splat(half_extent);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn from_ship(ship: &Ship) -> Self {
        Self::square(ship.pos, SHIP_HALF_EXTENT * ship.scale)
    }

    pub fn from_asteroid(asteroid: &Asteroid) -> Self {
        Self::square(asteroid.pos, ASTEROID_HALF_EXTENT * asteroid.scale)
    }

    /// Smallest box holding the blast's dash
    pub fn from_blast(blast: &Blast) -> Self {
        Self::from_corners(blast.pos, blast.tail())
    }

    /// Separating-axis test; touching edges count as overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.min.x > other.max.x
            || self.max.x < other.min.x
            || self.min.y > other.max.y
            || self.max.y < other.min.y)
    }
}

pub fn asteroid_hits_ship(ship: &Ship, asteroid: &Asteroid) -> bool {
    Aabb::from_asteroid(asteroid).overlaps(&Aabb::from_ship(ship))
}

pub fn blast_hits_asteroid(blast: &Blast, asteroid: &Asteroid) -> bool {
    Aabb::from_asteroid(asteroid).overlaps(&Aabb::from_blast(blast))
}

/// Check whether the ship just crashed into any asteroid
///
/// Detection and response are fused: a crash immediately opens a new
/// invincibility window of `invincible_secs`, so the same asteroid cannot
/// register again on the following ticks. An invincible ship never crashes.
pub fn ship_crash_detection(
    asteroids: &Cluster<Asteroid>,
    ship: &mut Ship,
    invincible_secs: f32,
) -> bool {
    if ship.is_invincible() {
        return false;
    }
    if asteroids.iter().any(|asteroid| asteroid_hits_ship(ship, asteroid)) {
        ship.just_hit(invincible_secs);
        log::debug!("ship crashed at ({:.1}, {:.1})", ship.pos.x, ship.pos.y);
        return true;
    }
    false
}

/// Resolve blast-on-asteroid hits for one tick
///
/// Each asteroid takes at most one blast and each blast hits at most one
/// asteroid: the first overlapping blast is consumed and the scan moves to the
/// next asteroid. Asteroids spawned by splits during this pass are only
/// examined on the next pass. Returns the score earned.
pub fn asteroid_hit_detection(
    asteroids: &mut Cluster<Asteroid>,
    blasts: &mut Cluster<Blast>,
    rule: SplitRule,
    score_step: u64,
) -> u64 {
    let mut earned = 0;
    let stop_after = asteroids.last();
    let mut cursor = asteroids.first();

    while let Some(handle) = cursor {
        // The split may remove this node, so step first
        cursor = if Some(handle) == stop_after {
            None
        } else {
            asteroids.next_of(handle)
        };

        let Some(asteroid) = asteroids.get(handle) else {
            continue;
        };
        let hit_blast = blasts
            .iter_with_handles()
            .find(|(_, blast)| blast_hits_asteroid(blast, asteroid))
            .map(|(blast_handle, _)| blast_handle);

        if let Some(blast_handle) = hit_blast {
            earned += score_step;
            blasts.remove(blast_handle);
            match hit_and_split(asteroids, handle, rule) {
                Some(HitOutcome::Split { .. }) => log::debug!("asteroid split"),
                Some(HitOutcome::Destroyed) => log::debug!("asteroid destroyed"),
                None => {}
            }
        }
    }

    earned
}
