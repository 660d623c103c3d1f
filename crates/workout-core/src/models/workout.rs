// ABOUTME: Block and set classification types shared by routines and active sessions
// ABOUTME: BlockType, SetType, and planned value ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// How the exercises of a block are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// A single exercise, all sets back to back
    Individual,
    /// Several exercises, one set each per round, rest after the round
    Superset,
    /// Several exercises round-robin, with separate rest between exercises and rounds
    Circuit,
}

impl BlockType {
    /// Whether the block groups several exercises
    #[must_use]
    pub const fn is_multi_exercise(self) -> bool {
        matches!(self, Self::Superset | Self::Circuit)
    }
}

/// Kind of set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetType {
    /// Regular working set
    #[default]
    Normal,
    /// Warm-up set
    Warmup,
    /// Drop set performed straight after the previous set at reduced load
    Drop,
    /// Rest-pause mini-set performed after a very short pause
    RestPause,
    /// Set taken to failure
    Failure,
}

impl SetType {
    /// Whether this set has to follow the previous one without a rest period
    #[must_use]
    pub const fn starts_immediately(self) -> bool {
        matches!(self, Self::Drop | Self::RestPause)
    }
}

/// Planned value range (e.g. "8-12 reps")
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl ValueRange {
    /// Create a range, swapping bounds given in the wrong order
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Whether `value` falls inside the range
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_and_rest_pause_start_immediately() {
        assert!(SetType::Drop.starts_immediately());
        assert!(SetType::RestPause.starts_immediately());
        assert!(!SetType::Normal.starts_immediately());
        assert!(!SetType::Warmup.starts_immediately());
    }

    #[test]
    fn test_range_normalizes_bounds() {
        let range = ValueRange::new(12.0, 8.0);
        assert!((range.min - 8.0).abs() < f64::EPSILON);
        assert!(range.contains(10.0));
        assert!(!range.contains(13.0));
    }
}
