//! Drifting asteroids and the hit/split rule

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cluster::{Cluster, Handle};
use crate::consts::*;
use crate::{heading_vector, normalize_degrees, wrap_position};

/// A single asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    /// Direction of travel, degrees in [0, 360)
    pub heading: f32,
    /// Visual spin, degrees in [0, 360), independent of heading
    pub twist: f32,
    /// px/s
    pub speed: f32,
    /// Degrees added to twist per tick
    pub rot_velocity: f32,
    pub scale: f32,
    /// Splits left before the next hit destroys it
    pub life_left: i32,
    /// Where this asteroid lives in its cluster
    #[serde(skip)]
    pub node: Option<Handle>,
}

/// How a hit reshapes an asteroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRule {
    /// Heading offset given to each half, degrees
    pub degree: f32,
    /// Each half's scale is divided by this
    pub shrink: f32,
}

impl Default for SplitRule {
    fn default() -> Self {
        Self {
            degree: ASTEROID_SPLIT_DEGREE,
            shrink: ASTEROID_SCALE_FACTOR_WHEN_HIT,
        }
    }
}

/// What a hit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// The hit asteroid shrank in place and a sibling was appended
    Split { spawned: Handle },
    /// The hit asteroid was on its last life and is gone
    Destroyed,
}

impl Asteroid {
    pub fn new(
        pos: Vec2,
        heading: f32,
        twist: f32,
        speed: f32,
        rot_velocity: f32,
        scale: f32,
        life_left: i32,
    ) -> Self {
        Self {
            pos,
            heading: normalize_degrees(heading),
            twist: normalize_degrees(twist),
            speed,
            rot_velocity,
            scale,
            life_left,
            node: None,
        }
    }

    /// A randomized asteroid anywhere on the field
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(
            Vec2::new(
                rng.random_range(1.0..FIELD_WIDTH),
                rng.random_range(1.0..FIELD_HEIGHT),
            ),
            rng.random_range(0.0..360.0),
            rng.random_range(0.0..360.0),
            rng.random_range(0.0..ASTEROID_MAX_SPEED),
            rng.random_range(0.0..ASTEROID_MAX_ROT_SPEED),
            rng.random_range(ASTEROID_SCALE_MIN..ASTEROID_SCALE_MAX),
            rng.random_range(1..ASTEROID_BASE_LIFE),
        )
    }

    /// Advance one tick: spin, integrate, wrap
    pub fn update(&mut self, dt: f32) {
        self.twist = normalize_degrees(self.twist + self.rot_velocity);
        self.pos = wrap_position(self.pos + heading_vector(self.heading) * self.speed * dt);
    }
}

/// Append an asteroid that remembers its own handle
pub fn spawn(asteroids: &mut Cluster<Asteroid>, asteroid: Asteroid) -> Handle {
    asteroids.add_with(|handle| Asteroid {
        node: Some(handle),
        ..asteroid
    })
}

/// Fill the cluster with `count` randomized asteroids
pub fn spawn_random(asteroids: &mut Cluster<Asteroid>, rng: &mut impl Rng, count: u32) {
    for _ in 0..count {
        spawn(asteroids, Asteroid::random(rng));
    }
    log::debug!("spawned {} asteroids ({} live)", count, asteroids.len());
}

/// Apply one hit to the asteroid behind `handle`
///
/// With life left, the asteroid shrinks and veers by `+degree` while a sibling
/// with one less life veers by `-degree`. On its last life it is removed.
/// Returns `None` if the handle is no longer live.
pub fn hit_and_split(
    asteroids: &mut Cluster<Asteroid>,
    handle: Handle,
    rule: SplitRule,
) -> Option<HitOutcome> {
    let asteroid = asteroids.get_mut(handle)?;

    if asteroid.life_left > 0 {
        let sibling = Asteroid::new(
            asteroid.pos,
            asteroid.heading - rule.degree,
            asteroid.twist,
            asteroid.speed,
            asteroid.rot_velocity,
            asteroid.scale / rule.shrink,
            asteroid.life_left - 1,
        );
        asteroid.heading = normalize_degrees(asteroid.heading + rule.degree);
        asteroid.scale /= rule.shrink;
        asteroid.life_left -= 1;

        let spawned = spawn(asteroids, sibling);
        Some(HitOutcome::Split { spawned })
    } else {
        let node = asteroid.node.unwrap_or(handle);
        asteroids.remove(node)?;
        Some(HitOutcome::Destroyed)
    }
}
