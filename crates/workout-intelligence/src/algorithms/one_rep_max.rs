// ABOUTME: Estimated one-rep-max algorithms for strength personal-record scoring
// ABOUTME: Implements Epley, Brzycki, and Lombardi formulas with input validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_workout_core::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Brzycki's formula diverges at 37 reps
const BRZYCKI_REP_LIMIT: f64 = 37.0;

/// Estimated one-rep-max (e1RM) algorithm selection
///
/// Converts a weight x reps set into the load the athlete could lift for a single
/// repetition, which makes sets with different rep counts comparable.
///
/// - `Epley`: `1RM = w x (1 + r / 30)`, the common default, slightly generous at high reps
/// - `Brzycki`: `1RM = w x 36 / (37 - r)`, conservative, only defined below 37 reps
/// - `Lombardi`: `1RM = w x r^0.10`, flattest curve, suited to low-rep work
///
/// # Scientific References
///
/// - Epley, B. (1985). "Poundage chart". *Boyd Epley Workout*.
/// - Brzycki, M. (1993). "Strength testing: predicting a one-rep max from reps-to-fatigue."
///   *JOPERD*, 64(1), 88-90.
/// - `LeSuer`, D.A., et al. (1997). "The accuracy of prediction equations for estimating
///   1-RM performance." *Journal of Strength and Conditioning Research*, 11(4), 211-213.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OneRepMaxAlgorithm {
    /// Epley formula
    #[default]
    Epley,
    /// Brzycki formula
    Brzycki,
    /// Lombardi formula
    Lombardi,
}

impl OneRepMaxAlgorithm {
    /// Estimate the one-rep max of a set
    ///
    /// Returns `None` when the set cannot be scored: fewer than one rep, a negative load,
    /// non-finite input, or a rep count outside the formula's domain.
    ///
    /// A single rep is always its own one-rep max regardless of the formula.
    #[must_use]
    pub fn estimate(self, weight: f64, reps: f64) -> Option<f64> {
        if !weight.is_finite() || !reps.is_finite() || weight < 0.0 || reps < 1.0 {
            return None;
        }
        if (reps - 1.0).abs() < f64::EPSILON {
            return Some(weight);
        }

        let estimate = match self {
            Self::Epley => weight * (1.0 + reps / 30.0),
            Self::Brzycki => {
                if reps >= BRZYCKI_REP_LIMIT {
                    return None;
                }
                weight * 36.0 / (BRZYCKI_REP_LIMIT - reps)
            }
            Self::Lombardi => weight * reps.powf(0.10),
        };
        Some(estimate)
    }

    /// Stable snake-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Epley => "epley",
            Self::Brzycki => "brzycki",
            Self::Lombardi => "lombardi",
        }
    }
}

impl fmt::Display for OneRepMaxAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OneRepMaxAlgorithm {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "epley" => Ok(Self::Epley),
            "brzycki" => Ok(Self::Brzycki),
            "lombardi" => Ok(Self::Lombardi),
            other => Err(AppError::invalid_input(format!(
                "Unknown one-rep-max algorithm: {other}. Valid options: epley, brzycki, lombardi"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_epley_estimate() {
        let estimate = OneRepMaxAlgorithm::Epley.estimate(100.0, 10.0).unwrap();
        assert!(approx(estimate, 100.0 * (1.0 + 10.0 / 30.0)));
    }

    #[test]
    fn test_brzycki_estimate() {
        let estimate = OneRepMaxAlgorithm::Brzycki.estimate(100.0, 10.0).unwrap();
        assert!(approx(estimate, 100.0 * 36.0 / 27.0));
    }

    #[test]
    fn test_single_rep_is_its_own_max() {
        for algorithm in [
            OneRepMaxAlgorithm::Epley,
            OneRepMaxAlgorithm::Brzycki,
            OneRepMaxAlgorithm::Lombardi,
        ] {
            assert!(approx(algorithm.estimate(140.0, 1.0).unwrap(), 140.0));
        }
    }

    #[test]
    fn test_invalid_inputs_are_not_scored() {
        assert_eq!(OneRepMaxAlgorithm::Epley.estimate(100.0, 0.0), None);
        assert_eq!(OneRepMaxAlgorithm::Epley.estimate(-5.0, 5.0), None);
        assert_eq!(OneRepMaxAlgorithm::Brzycki.estimate(60.0, 40.0), None);
        assert_eq!(OneRepMaxAlgorithm::Lombardi.estimate(f64::NAN, 5.0), None);
    }

    #[test]
    fn test_parse_algorithm_names() {
        assert_eq!(
            "Brzycki".parse::<OneRepMaxAlgorithm>().unwrap(),
            OneRepMaxAlgorithm::Brzycki
        );
        assert!("wathan".parse::<OneRepMaxAlgorithm>().is_err());
    }
}
