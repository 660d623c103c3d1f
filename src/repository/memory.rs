// ABOUTME: In-memory workout repository with preloaded data and switchable failures
// ABOUTME: Backs integration tests and the replay tool without any storage engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # In-Memory Workout Repository
//!
//! Data is loaded up front with the `with_*` builder methods and kept behind a tokio
//! `RwLock`. Each collaborator operation can be switched to fail, which is how tests
//! exercise the degraded paths of session start and commit.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::WorkoutRepository;
use crate::constants::id_prefixes;
use crate::errors::{AppError, AppResult};
use crate::models::{
    ExerciseDefinitionId, FinishedSession, PrSnapshot, PreviousSet, RoutineId, RoutineSnapshot,
};

/// Collaborator operation that can be switched to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// `fetch_routine`
    FetchRoutine,
    /// `fetch_previous_sets`
    FetchPreviousSets,
    /// `fetch_current_prs`
    FetchCurrentPrs,
    /// `has_performed_routine`
    HasPerformedRoutine,
    /// `commit_session`
    CommitSession,
}

#[derive(Debug, Default)]
struct FailureSwitches {
    fetch_routine: AtomicBool,
    fetch_previous_sets: AtomicBool,
    fetch_current_prs: AtomicBool,
    has_performed_routine: AtomicBool,
    commit_session: AtomicBool,
}

impl FailureSwitches {
    const fn switch(&self, operation: RepositoryOperation) -> &AtomicBool {
        match operation {
            RepositoryOperation::FetchRoutine => &self.fetch_routine,
            RepositoryOperation::FetchPreviousSets => &self.fetch_previous_sets,
            RepositoryOperation::FetchCurrentPrs => &self.fetch_current_prs,
            RepositoryOperation::HasPerformedRoutine => &self.has_performed_routine,
            RepositoryOperation::CommitSession => &self.commit_session,
        }
    }

    fn check(&self, operation: RepositoryOperation) -> AppResult<()> {
        if self.switch(operation).load(Ordering::SeqCst) {
            return Err(AppError::storage(format!(
                "injected failure in {operation:?}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RepositoryData {
    routines: HashMap<RoutineId, RoutineSnapshot>,
    previous_sets: HashMap<(Uuid, ExerciseDefinitionId), Vec<PreviousSet>>,
    personal_records: HashMap<(Uuid, ExerciseDefinitionId), PrSnapshot>,
    performed: HashSet<(Uuid, RoutineId)>,
    committed: Vec<(String, FinishedSession)>,
}

/// Workout repository kept entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryWorkoutRepository {
    data: RwLock<RepositoryData>,
    failures: FailureSwitches,
}

impl InMemoryWorkoutRepository {
    /// Empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a routine
    #[must_use]
    pub fn with_routine(mut self, routine: RoutineSnapshot) -> Self {
        self.data
            .get_mut()
            .routines
            .insert(routine.id.clone(), routine);
        self
    }

    /// Preload previous-set history, newest first
    #[must_use]
    pub fn with_previous_sets(
        mut self,
        user_id: Uuid,
        exercise_id: impl Into<ExerciseDefinitionId>,
        sets: Vec<PreviousSet>,
    ) -> Self {
        self.data
            .get_mut()
            .previous_sets
            .insert((user_id, exercise_id.into()), sets);
        self
    }

    /// Preload a persisted personal record
    #[must_use]
    pub fn with_personal_record(mut self, user_id: Uuid, record: PrSnapshot) -> Self {
        self.data
            .get_mut()
            .personal_records
            .insert((user_id, record.exercise_id.clone()), record);
        self
    }

    /// Mark a routine as performed by the user
    #[must_use]
    pub fn with_performed_routine(mut self, user_id: Uuid, routine_id: impl Into<RoutineId>) -> Self {
        self.data
            .get_mut()
            .performed
            .insert((user_id, routine_id.into()));
        self
    }

    /// Make an operation fail (or succeed again)
    pub fn set_failing(&self, operation: RepositoryOperation, failing: bool) {
        self.failures.switch(operation).store(failing, Ordering::SeqCst);
    }

    /// Sessions committed so far with their persisted ids
    pub async fn committed_sessions(&self) -> Vec<(String, FinishedSession)> {
        self.data.read().await.committed.clone()
    }
}

#[async_trait]
impl WorkoutRepository for InMemoryWorkoutRepository {
    async fn fetch_routine(&self, routine_id: &RoutineId) -> AppResult<RoutineSnapshot> {
        self.failures.check(RepositoryOperation::FetchRoutine)?;
        self.data
            .read()
            .await
            .routines
            .get(routine_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Routine {routine_id}")))
    }

    async fn fetch_previous_sets(
        &self,
        user_id: Uuid,
        exercise_id: &ExerciseDefinitionId,
        limit: usize,
    ) -> AppResult<Vec<PreviousSet>> {
        self.failures.check(RepositoryOperation::FetchPreviousSets)?;
        let data = self.data.read().await;
        Ok(data
            .previous_sets
            .get(&(user_id, exercise_id.clone()))
            .map(|sets| sets.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn fetch_current_prs(
        &self,
        user_id: Uuid,
        exercise_ids: &[ExerciseDefinitionId],
    ) -> AppResult<HashMap<ExerciseDefinitionId, PrSnapshot>> {
        self.failures.check(RepositoryOperation::FetchCurrentPrs)?;
        let data = self.data.read().await;
        Ok(exercise_ids
            .iter()
            .filter_map(|id| {
                data.personal_records
                    .get(&(user_id, id.clone()))
                    .map(|record| (id.clone(), record.clone()))
            })
            .collect())
    }

    async fn has_performed_routine(
        &self,
        user_id: Uuid,
        routine_id: &RoutineId,
    ) -> AppResult<bool> {
        self.failures
            .check(RepositoryOperation::HasPerformedRoutine)?;
        Ok(self
            .data
            .read()
            .await
            .performed
            .contains(&(user_id, routine_id.clone())))
    }

    async fn commit_session(&self, session: FinishedSession) -> AppResult<String> {
        self.failures.check(RepositoryOperation::CommitSession)?;
        let id = format!("{}-{}", id_prefixes::COMMITTED_SESSION, Uuid::new_v4());
        let mut data = self.data.write().await;

        for record in &session.personal_records {
            data.personal_records.insert(
                (session.user_id, record.exercise_id.clone()),
                PrSnapshot {
                    exercise_id: record.exercise_id.clone(),
                    template: record.template,
                    primary_value: record.primary_value,
                    secondary_value: record.secondary_value,
                    score: record.score,
                    achieved_at: record.achieved_at,
                },
            );
        }
        data.performed
            .insert((session.user_id, session.routine_id.clone()));
        data.committed.push((id.clone(), session));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_routine_is_not_found() {
        let repository = InMemoryWorkoutRepository::new();
        let error = repository
            .fetch_routine(&RoutineId::new("nope"))
            .await
            .unwrap_err();
        assert_eq!(error.code, crate::errors::ErrorCode::ResourceNotFound);
    }

    #[tokio::test]
    async fn test_failure_injection_toggles() {
        let repository = InMemoryWorkoutRepository::new();
        let user = Uuid::new_v4();
        let routine = RoutineId::new("r1");

        repository.set_failing(RepositoryOperation::HasPerformedRoutine, true);
        assert!(repository.has_performed_routine(user, &routine).await.is_err());

        repository.set_failing(RepositoryOperation::HasPerformedRoutine, false);
        assert!(!repository.has_performed_routine(user, &routine).await.unwrap());
    }
}
