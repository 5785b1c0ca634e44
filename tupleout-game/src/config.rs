//! Game configuration and validation.
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::constants::{DEFAULT_ROLL_DELAY_MS, DEFAULT_TARGET_SCORE, MAX_ROLL_DELAY_MS};

/// When the target-score check runs.
///
/// The historical rules only check scores between rounds, so players later in
/// the order still take their turns after an earlier player has reached the
/// target. `EveryTurn` is the corrected rule that cuts the round short.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishRule {
    /// Check once per round boundary; a full round always plays out.
    #[default]
    RoundBoundary,
    /// Check before every turn; the round stops as soon as someone wins.
    EveryTurn,
}

/// Session-level settings validated before play starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cumulative score that ends the game.
    #[serde(default = "GameConfig::default_target_score")]
    pub target_score: u32,
    /// Target-score check placement.
    #[serde(default)]
    pub finish_rule: FinishRule,
    /// Pause before each roll is revealed, in milliseconds. Consumed by the
    /// I/O provider; the core never sleeps.
    #[serde(default = "GameConfig::default_roll_delay_ms")]
    pub roll_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: Self::default_target_score(),
            finish_rule: FinishRule::default(),
            roll_delay_ms: Self::default_roll_delay_ms(),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub const fn default_target_score() -> u32 {
        DEFAULT_TARGET_SCORE
    }

    #[must_use]
    pub const fn default_roll_delay_ms() -> u64 {
        DEFAULT_ROLL_DELAY_MS
    }

    /// Roll-reveal pause as a [`Duration`].
    #[must_use]
    pub const fn roll_delay(&self) -> Duration {
        Duration::from_millis(self.roll_delay_ms)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_score == 0 {
            return Err(ConfigError::TargetScore);
        }
        if self.roll_delay_ms > MAX_ROLL_DELAY_MS {
            return Err(ConfigError::RollDelay(self.roll_delay_ms));
        }
        Ok(())
    }
}

/// Violations reported by [`GameConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("target score must be at least 1")]
    TargetScore,
    #[error("roll delay of {0}ms exceeds the {MAX_ROLL_DELAY_MS}ms cap")]
    RollDelay(u64),
}
