//! Game state owned by the frame loop
//!
//! Everything a tick reads or writes lives here and is lent to each subsystem
//! for the duration of one call.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{self, Asteroid};
use super::blast::Blast;
use super::cluster::Cluster;
use super::level::{GameStatus, Level};
use super::ship::Ship;
use crate::tuning::Tuning;

/// Player score, never below zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub value: u64,
}

impl Score {
    /// Starts at one step rather than zero
    pub fn new(step: u64) -> Self {
        Self { value: step }
    }

    /// Apply a signed delta, clamping at zero; returns the new value
    pub fn change(&mut self, delta: i64) -> u64 {
        let updated = (self.value as i128 + delta as i128).max(0);
        self.value = u64::try_from(updated).unwrap_or(u64::MAX);
        self.value
    }
}

/// Remaining ship lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeCounter {
    pub lives: u32,
}

impl LifeCounter {
    pub fn new(lives: u32) -> Self {
        Self { lives }
    }

    /// Spend one life; returns what is left (0 stays 0)
    pub fn lose_one(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn add_one(&mut self) -> u32 {
        self.lives += 1;
        self.lives
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub ship: Ship,
    pub blasts: Cluster<Blast>,
    pub asteroids: Cluster<Asteroid>,
    pub score: Score,
    pub lives: LifeCounter,
    pub level: Level,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// New session on level 1 with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let level = Level::first(&tuning);
        let mut state = Self {
            seed,
            ship: Ship::default(),
            blasts: Cluster::new(),
            asteroids: Cluster::new(),
            score: Score::new(tuning.score_step),
            lives: LifeCounter::new(tuning.initial_lives),
            level,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };

        // Level 1 is populated up front; later levels spawn on NextLevel
        let count = state.level.asteroid_total;
        asteroid::spawn_random(&mut state.asteroids, &mut state.rng, count);
        log::info!("session seeded with {seed}: {count} asteroids");

        state
    }

    pub fn status(&self) -> GameStatus {
        self.level.status
    }

    /// Build the next level: bump the number, repopulate, grant a life
    pub fn advance_level(&mut self) {
        self.level.go_next(&self.tuning);
        let count = self.level.asteroid_total;
        asteroid::spawn_random(&mut self.asteroids, &mut self.rng, count);
        let lives = self.lives.add_one();
        log::info!("bonus life granted, {lives} lives");
    }

    /// Fire a blast from the ship's current pose
    pub fn fire(&mut self) {
        self.blasts.add(Blast::from_ship(&self.ship));
    }

    /// Fatal structural check on both clusters
    ///
    /// Release builds only check the ends and counts; debug builds walk every
    /// link as well.
    pub fn check_clusters(&self) {
        let (asteroids, blasts) = if cfg!(debug_assertions) {
            (self.asteroids.check_links(), self.blasts.check_links())
        } else {
            (self.asteroids.check_ends(), self.blasts.check_ends())
        };
        if let Err(err) = asteroids {
            log::error!("asteroid cluster corrupted: {err}");
            panic!("asteroid cluster corrupted: {err}");
        }
        if let Err(err) = blasts {
            log::error!("blast cluster corrupted: {err}");
            panic!("blast cluster corrupted: {err}");
        }
    }
}
