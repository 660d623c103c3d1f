// ABOUTME: Rest timer state derived from wall-clock start time and duration
// ABOUTME: A single timer instance that is updated in place instead of stacked
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::BlockId;

/// Which rest period of a block a timer or cursor refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestKind {
    /// Rest after a set or a completed round
    BetweenSets,
    /// Rest between exercises of a circuit
    BetweenExercises,
}

/// Outcome of the rest policy: rest of `kind` for `duration_secs`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestDecision {
    /// Rest period type
    pub kind: RestKind,
    /// Duration in seconds, always positive
    pub duration_secs: u32,
}

/// The active rest timer
///
/// The runtime never ticks the timer. Remaining time is derived from the start timestamp,
/// so a suspended app resumes with the correct value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestTimer {
    /// Block whose rest policy started the timer
    pub block_id: BlockId,
    /// Rest period type
    pub kind: RestKind,
    /// Full duration, seconds
    pub total_secs: u32,
    /// Remaining time at `started_at`, seconds
    pub remaining_at_start_secs: u32,
    /// Whether the timer is running
    pub active: bool,
    /// Wall-clock start of the current countdown
    pub started_at: DateTime<Utc>,
}

impl RestTimer {
    pub(crate) fn start(block_id: BlockId, decision: RestDecision, now: DateTime<Utc>) -> Self {
        Self {
            block_id,
            kind: decision.kind,
            total_secs: decision.duration_secs,
            remaining_at_start_secs: decision.duration_secs,
            active: true,
            started_at: now,
        }
    }

    /// Restart this timer with a new decision, keeping the same instance
    pub(crate) fn restart(&mut self, block_id: BlockId, decision: RestDecision, now: DateTime<Utc>) {
        self.block_id = block_id;
        self.kind = decision.kind;
        self.total_secs = decision.duration_secs;
        self.remaining_at_start_secs = decision.duration_secs;
        self.active = true;
        self.started_at = now;
    }

    /// Seconds left at `now`; zero once expired or stopped
    #[must_use]
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u32 {
        if !self.active {
            return 0;
        }
        let elapsed = (now - self.started_at).num_seconds().max(0);
        let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);
        self.remaining_at_start_secs.saturating_sub(elapsed)
    }

    /// Whether the countdown has reached zero
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining_secs(now) == 0
    }

    /// Add (or with a negative delta, remove) time from the running countdown
    pub(crate) fn adjust(&mut self, delta_secs: i64, now: DateTime<Utc>) {
        let remaining = i64::from(self.remaining_secs(now)) + delta_secs;
        let remaining = u32::try_from(remaining.max(0)).unwrap_or(u32::MAX);
        let total = (i64::from(self.total_secs) + delta_secs).max(0);
        self.total_secs = u32::try_from(total).unwrap_or(u32::MAX);
        self.remaining_at_start_secs = remaining;
        self.started_at = now;
        self.active = remaining > 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn timer(now: DateTime<Utc>) -> RestTimer {
        RestTimer::start(
            BlockId::from_raw(1),
            RestDecision {
                kind: RestKind::BetweenSets,
                duration_secs: 90,
            },
            now,
        )
    }

    #[test]
    fn test_remaining_derived_from_wall_clock() {
        let now = Utc::now();
        let timer = timer(now);
        assert_eq!(timer.remaining_secs(now), 90);
        assert_eq!(timer.remaining_secs(now + Duration::seconds(30)), 60);
        assert!(timer.is_expired(now + Duration::seconds(200)));
    }

    #[test]
    fn test_clock_skew_before_start_counts_as_full_duration() {
        let now = Utc::now();
        let timer = timer(now);
        assert_eq!(timer.remaining_secs(now - Duration::seconds(10)), 90);
    }

    #[test]
    fn test_adjust_clamps_at_zero() {
        let now = Utc::now();
        let mut timer = timer(now);
        timer.adjust(15, now + Duration::seconds(30));
        assert_eq!(timer.remaining_secs(now + Duration::seconds(30)), 75);
        assert_eq!(timer.total_secs, 105);

        timer.adjust(-500, now + Duration::seconds(40));
        assert!(!timer.active);
        assert_eq!(timer.remaining_secs(now + Duration::seconds(40)), 0);
    }
}
