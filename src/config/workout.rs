// ABOUTME: Runtime configuration for active workouts loaded from environment variables
// ABOUTME: Default set counts, rest durations, history depth, and PR scoring formula
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_workout_core::constants::{history, workout_defaults};
use pierre_workout_intelligence::OneRepMaxAlgorithm;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use super::error::ConfigError;

/// Settings applied while building and mutating a workout graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutConfig {
    /// Sets created for each exercise added during a workout
    pub default_sets_per_exercise: usize,
    /// Historical sets fetched per exercise definition
    pub previous_set_history_limit: usize,
    /// Rest between sets for blocks created during a workout (seconds)
    pub default_rest_between_sets_secs: u32,
    /// Rest between exercises for circuit blocks created during a workout (seconds)
    pub default_rest_between_exercises_secs: u32,
    /// Circuit timer target when a set has no planned duration (seconds)
    pub circuit_item_default_secs: u32,
    /// Formula used to score weight x reps sets
    pub one_rep_max_algorithm: OneRepMaxAlgorithm,
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            default_sets_per_exercise: workout_defaults::SETS_PER_NEW_EXERCISE,
            previous_set_history_limit: history::PREVIOUS_SET_LIMIT,
            default_rest_between_sets_secs: workout_defaults::REST_BETWEEN_SETS_SECS,
            default_rest_between_exercises_secs: workout_defaults::REST_BETWEEN_EXERCISES_SECS,
            circuit_item_default_secs: workout_defaults::CIRCUIT_ITEM_SECS,
            one_rep_max_algorithm: OneRepMaxAlgorithm::default(),
        }
    }
}

impl WorkoutConfig {
    /// Load workout configuration from environment, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or if the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            default_sets_per_exercise: env_parse(
                "WORKOUT_DEFAULT_SETS",
                defaults.default_sets_per_exercise,
            )?,
            previous_set_history_limit: env_parse(
                "WORKOUT_HISTORY_LIMIT",
                defaults.previous_set_history_limit,
            )?,
            default_rest_between_sets_secs: env_parse(
                "WORKOUT_REST_BETWEEN_SETS_SECS",
                defaults.default_rest_between_sets_secs,
            )?,
            default_rest_between_exercises_secs: env_parse(
                "WORKOUT_REST_BETWEEN_EXERCISES_SECS",
                defaults.default_rest_between_exercises_secs,
            )?,
            circuit_item_default_secs: env_parse(
                "WORKOUT_CIRCUIT_ITEM_SECS",
                defaults.circuit_item_default_secs,
            )?,
            one_rep_max_algorithm: match env::var("WORKOUT_ONE_REP_MAX") {
                Ok(raw) => OneRepMaxAlgorithm::from_str(&raw)
                    .map_err(|e| ConfigError::Parse(e.message))?,
                Err(_) => defaults.one_rep_max_algorithm,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for values the runtime cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_sets_per_exercise == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "default_sets_per_exercise must be at least 1",
            ));
        }
        if self.previous_set_history_limit == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "previous_set_history_limit must be at least 1",
            ));
        }
        if self.circuit_item_default_secs == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "circuit_item_default_secs must be at least 1",
            ));
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnvValue { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = WorkoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_sets_per_exercise, 3);
        assert_eq!(config.circuit_item_default_secs, 30);
    }

    #[test]
    fn test_zero_sets_rejected() {
        let config = WorkoutConfig {
            default_sets_per_exercise: 0,
            ..WorkoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }
}
