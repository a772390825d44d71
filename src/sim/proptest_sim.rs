//! Property-based tests for the simulation using proptest.
//!
//! These cover the structural invariants that unit tests only sample.

use glam::Vec2;
use proptest::prelude::*;

use super::asteroid::{Asteroid, SplitRule, hit_and_split, spawn};
use super::blast::Blast;
use super::cluster::{Cluster, Handle};
use super::collision::asteroid_hit_detection;
use super::state::Score;
use crate::consts::*;
use crate::wrap_position;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any finite position wraps back inside the field.
    #[test]
    fn prop_wrap_stays_in_field(x in -1.0e5f32..1.0e5, y in -1.0e5f32..1.0e5) {
        let wrapped = wrap_position(Vec2::new(x, y));
        prop_assert!((0.0..FIELD_WIDTH).contains(&wrapped.x), "x wrapped to {}", wrapped.x);
        prop_assert!((0.0..FIELD_HEIGHT).contains(&wrapped.y), "y wrapped to {}", wrapped.y);

        // Only whole field lengths are added or removed
        let turns_x = (x - wrapped.x) / FIELD_WIDTH;
        let turns_y = (y - wrapped.y) / FIELD_HEIGHT;
        prop_assert!((turns_x - turns_x.round()).abs() < 1e-4, "x moved by {} fields", turns_x);
        prop_assert!((turns_y - turns_y.round()).abs() < 1e-4, "y moved by {} fields", turns_y);
    }

    /// Links, count and order survive any add/remove sequence.
    #[test]
    fn prop_cluster_matches_model(ops in prop::collection::vec((any::<bool>(), 0usize..64), 1..200)) {
        let mut cluster = Cluster::new();
        let mut model: Vec<(Handle, usize)> = Vec::new();

        for (step, (add, pick)) in ops.into_iter().enumerate() {
            if add || model.is_empty() {
                model.push((cluster.add(step), step));
            } else {
                let (handle, value) = model.remove(pick % model.len());
                prop_assert_eq!(cluster.remove(handle), Some(value));
                prop_assert_eq!(cluster.remove(handle), None);
            }
            prop_assert!(cluster.check_links().is_ok());
            prop_assert_eq!(cluster.len(), model.len());
        }

        let order: Vec<usize> = cluster.iter().copied().collect();
        let expected: Vec<usize> = model.iter().map(|(_, v)| *v).collect();
        prop_assert_eq!(order, expected);
    }

    /// Score follows the clamped running sum.
    #[test]
    fn prop_score_never_negative(deltas in prop::collection::vec(-1000i64..1000, 0..50)) {
        let mut score = Score::new(SCORE_STEP);
        let mut expected = SCORE_STEP as i64;
        for delta in deltas {
            expected = (expected + delta).max(0);
            prop_assert_eq!(score.change(delta), expected as u64);
        }
    }

    /// A lineage started at life `L` is cleared after exactly 2^(L+1) - 1 hits.
    #[test]
    fn prop_lineage_clears_after_full_hit_count(life in 0i32..6) {
        let mut asteroids = Cluster::new();
        spawn(&mut asteroids, Asteroid::new(Vec2::new(300.0, 300.0), 0.0, 0.0, 0.0, 0.0, 3.0, life));

        let mut hits = 0u32;
        while let Some(handle) = asteroids.first() {
            prop_assert!(hit_and_split(&mut asteroids, handle, SplitRule::default()).is_some());
            hits += 1;
            prop_assert!(asteroids.iter().all(|a| a.life_left >= 0));
        }
        prop_assert_eq!(hits, (1u32 << (life + 1)) - 1);
    }

    /// One blast per asteroid and one asteroid per blast, scored per hit.
    #[test]
    fn prop_hit_detection_is_exclusive(
        rocks in prop::collection::vec((0.0f32..400.0, 0.0f32..400.0), 1..20),
        shots in prop::collection::vec((0.0f32..400.0, 0.0f32..400.0, 0.0f32..360.0), 0..20),
    ) {
        let mut asteroids = Cluster::new();
        for (x, y) in rocks {
            spawn(&mut asteroids, Asteroid::new(Vec2::new(x, y), 0.0, 0.0, 0.0, 0.0, 1.0, 0));
        }
        let mut blasts = Cluster::new();
        for (x, y, heading) in shots {
            blasts.add(Blast::new(Vec2::new(x, y), heading));
        }
        let (rocks_before, shots_before) = (asteroids.len(), blasts.len());

        let earned = asteroid_hit_detection(&mut asteroids, &mut blasts, SplitRule::default(), SCORE_STEP);

        let destroyed = rocks_before - asteroids.len();
        let spent = shots_before - blasts.len();
        prop_assert_eq!(destroyed, spent);
        prop_assert_eq!(earned, destroyed as u64 * SCORE_STEP);
        prop_assert!(asteroids.check_links().is_ok());
        prop_assert!(blasts.check_links().is_ok());
    }
}
