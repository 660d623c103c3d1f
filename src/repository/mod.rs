// ABOUTME: Persistence collaborator boundary of the workout runtime
// ABOUTME: Async repository trait plus the LoadOutcome wrapper for best-effort lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Repository
//!
//! The runtime never talks to storage directly. Everything it needs from persistence
//! goes through [`WorkoutRepository`]:
//!
//! - routine snapshots to start a session from
//! - previous-set history per exercise definition
//! - current personal records
//! - whether the user performed the routine before
//! - committing a finished session
//!
//! Only the routine fetch and the commit are allowed to fail the caller. The other
//! lookups are best effort and fall back to empty values through [`LoadOutcome`].

/// In-memory implementation used by tests and the replay tool
pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{
    ExerciseDefinitionId, FinishedSession, PrSnapshot, PreviousSet, RoutineId, RoutineSnapshot,
};

pub use memory::{InMemoryWorkoutRepository, RepositoryOperation};

/// Persistence collaborator of the workout runtime
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Load a routine snapshot
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the routine does not exist, or a storage error
    async fn fetch_routine(&self, routine_id: &RoutineId) -> AppResult<RoutineSnapshot>;

    /// Most recent sets of an exercise performed by the user, newest first
    async fn fetch_previous_sets(
        &self,
        user_id: Uuid,
        exercise_id: &ExerciseDefinitionId,
        limit: usize,
    ) -> AppResult<Vec<PreviousSet>>;

    /// Current all-time records of the given exercises
    async fn fetch_current_prs(
        &self,
        user_id: Uuid,
        exercise_ids: &[ExerciseDefinitionId],
    ) -> AppResult<HashMap<ExerciseDefinitionId, PrSnapshot>>;

    /// Whether the user completed the routine at least once
    async fn has_performed_routine(&self, user_id: Uuid, routine_id: &RoutineId)
        -> AppResult<bool>;

    /// Persist a finished session and its personal records; returns the persisted id
    ///
    /// # Errors
    ///
    /// Returns a storage error if the session could not be written
    async fn commit_session(&self, session: FinishedSession) -> AppResult<String>;
}

/// Result of a best-effort lookup
#[derive(Debug)]
pub enum LoadOutcome<T> {
    /// The lookup succeeded
    Loaded(T),
    /// The lookup produced a usable but incomplete value
    Degraded {
        /// Value to use
        value: T,
        /// What was lost
        reason: String,
    },
    /// The lookup failed
    Failed(AppError),
}

impl<T> LoadOutcome<T> {
    /// Whether the lookup fully succeeded
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

impl<T: Default> LoadOutcome<T> {
    /// Wrap a collaborator result
    #[must_use]
    pub fn from_result(result: AppResult<T>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(error) => Self::Failed(error),
        }
    }

    /// Value to use, falling back to the default on failure
    ///
    /// Degraded and failed loads are logged at `warn` with `what` naming the lookup.
    pub fn best_effort(self, what: &str) -> T {
        match self {
            Self::Loaded(value) => value,
            Self::Degraded { value, reason } => {
                warn!(lookup = what, %reason, "Partial result from workout repository");
                value
            }
            Self::Failed(error) => {
                warn!(lookup = what, error = %error, "Workout repository lookup failed, using default");
                T::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_load_falls_back_to_default() {
        let outcome: LoadOutcome<Vec<u32>> =
            LoadOutcome::from_result(Err(AppError::storage("database locked")));
        assert!(!outcome.is_loaded());
        assert!(outcome.best_effort("previous sets").is_empty());
    }

    #[test]
    fn test_degraded_load_keeps_value() {
        let outcome = LoadOutcome::Degraded {
            value: vec![1, 2],
            reason: "truncated".into(),
        };
        assert_eq!(outcome.best_effort("previous sets"), vec![1, 2]);
    }
}
