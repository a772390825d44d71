//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (cluster insertion order)
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod blast;
pub mod cluster;
pub mod collision;
pub mod level;
pub mod ship;
pub mod state;
pub mod tick;

#[cfg(test)]
mod proptest_sim;

pub use asteroid::{Asteroid, HitOutcome, SplitRule, hit_and_split};
pub use blast::{Blast, BlastStatus};
pub use cluster::{Cluster, ClusterError, Handle};
pub use collision::{Aabb, asteroid_hit_detection, ship_crash_detection};
pub use level::{GameStatus, Level, Systems};
pub use ship::Ship;
pub use state::{GameState, LifeCounter, Score};
pub use tick::{TickInput, tick};
