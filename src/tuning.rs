//! Gameplay tuning
//!
//! Balance knobs that shape a session. Defaults come from [`crate::consts`];
//! any subset can be overridden from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::SplitRule;

/// Why a tuning document was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("initial_lives must be at least 1")]
    NoLives,
    #[error("asteroid_shrink must be greater than 1 (got {0})")]
    ShrinkTooSmall(f32),
}

/// Game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship ===
    /// Lives at session start
    pub initial_lives: u32,
    /// Crash immunity window (seconds)
    pub ship_invincible_secs: f32,

    // === Level flow ===
    /// "LEVEL n" overlay duration (seconds)
    pub level_number_secs: f32,
    /// "START" overlay duration (seconds)
    pub level_start_secs: f32,
    /// "YOU WIN!" overlay duration (seconds)
    pub level_win_secs: f32,
    /// Asteroids on level 1
    pub asteroid_init_number: u32,
    /// Extra asteroids per level after the first
    pub asteroids_per_level: u32,

    // === Scoring and splitting ===
    /// Points per asteroid hit; also the starting score
    pub score_step: u64,
    /// Heading offset of each half after a split (degrees)
    pub split_degree: f32,
    /// Scale divisor applied to both halves after a split
    pub asteroid_shrink: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_lives: INITIAL_LIVES,
            ship_invincible_secs: SHIP_INVINCIBLE_TIME,

            level_number_secs: LEVEL_NUMBER_COUNTDOWN,
            level_start_secs: LEVEL_START_COUNTDOWN,
            level_win_secs: LEVEL_WIN_COUNTDOWN,
            asteroid_init_number: ASTEROID_INIT_NUMBER,
            asteroids_per_level: ASTEROIDS_PER_LEVEL,

            score_step: SCORE_STEP,
            split_degree: ASTEROID_SPLIT_DEGREE,
            asteroid_shrink: ASTEROID_SCALE_FACTOR_WHEN_HIT,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.initial_lives == 0 {
            return Err(TuningError::NoLives);
        }
        let durations = [
            ("ship_invincible_secs", self.ship_invincible_secs),
            ("level_number_secs", self.level_number_secs),
            ("level_start_secs", self.level_start_secs),
            ("level_win_secs", self.level_win_secs),
        ];
        for (field, value) in durations {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        if self.asteroid_shrink.is_nan() || self.asteroid_shrink <= 1.0 {
            return Err(TuningError::ShrinkTooSmall(self.asteroid_shrink));
        }
        Ok(())
    }

    /// How asteroids break apart under this tuning
    pub fn split_rule(&self) -> SplitRule {
        SplitRule {
            degree: self.split_degree,
            shrink: self.asteroid_shrink,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.split_rule(), SplitRule::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "initial_lives": 5, "score_step": 50 }"#).unwrap();
        assert_eq!(tuning.initial_lives, 5);
        assert_eq!(tuning.score_step, 50);
        assert_eq!(tuning.asteroid_init_number, ASTEROID_INIT_NUMBER);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            asteroids_per_level: 4,
            ..Tuning::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "initial_lives": 0 }"#),
            Err(TuningError::NoLives)
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "level_win_secs": -1.0 }"#),
            Err(TuningError::NotPositive { field: "level_win_secs", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "asteroid_shrink": 1.0 }"#),
            Err(TuningError::ShrinkTooSmall(_))
        ));
    }
}
