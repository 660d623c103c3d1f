// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Default set counts, rest durations, and history depth for active workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Defaults used when the runtime has to invent values the routine did not provide.
//! Every value here can be overridden through `WorkoutConfig`.

/// Defaults applied to blocks and sets created during a workout
pub mod workout_defaults {
    /// Sets created for each exercise added during a workout
    pub const SETS_PER_NEW_EXERCISE: usize = 3;
    /// Rest between sets for blocks created during a workout (seconds)
    pub const REST_BETWEEN_SETS_SECS: u32 = 90;
    /// Rest between exercises for circuit blocks created during a workout (seconds)
    pub const REST_BETWEEN_EXERCISES_SECS: u32 = 30;
    /// Target duration of a circuit timer item without a planned value (seconds)
    pub const CIRCUIT_ITEM_SECS: u32 = 30;
}

/// Collaborator lookup limits
pub mod history {
    /// Number of historical sets fetched per exercise definition
    pub const PREVIOUS_SET_LIMIT: usize = 10;
}

/// Identifier prefixes
pub mod id_prefixes {
    /// Prefix for routines minted for quick (empty) starts
    pub const QUICK_START_ROUTINE: &str = "quick";
    /// Prefix for session ids returned by the in-memory repository
    pub const COMMITTED_SESSION: &str = "session";
}
