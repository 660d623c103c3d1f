// ABOUTME: Owner of the single active workout and its collaborator round-trips
// ABOUTME: Starts sessions, merges history loads, finishes and discards workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Runtime
//!
//! `WorkoutRuntime` owns `Option<WorkoutGraph>`: at most one workout is active. Graph
//! mutations are plain synchronous calls through [`WorkoutRuntime::graph_mut`]; the only
//! awaits are repository calls made while starting, loading history, and finishing.
//!
//! Starting a session loads everything it can in parallel. Only a missing routine fails
//! the start; history, records, and the "performed before" flag degrade to empty values.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pierre_workout_intelligence::PrScoringRegistry;
use tracing::{info, warn};
use uuid::Uuid;

use crate::builder::GraphBuilder;
use crate::config::WorkoutConfig;
use crate::errors::{AppError, AppResult};
use crate::graph::WorkoutGraph;
use crate::history::{HistoryBatch, HistoryLoadTask};
use crate::models::RoutineId;
use crate::repository::{LoadOutcome, WorkoutRepository};

/// Runtime holding at most one active workout for a user
pub struct WorkoutRuntime {
    repository: Arc<dyn WorkoutRepository>,
    config: WorkoutConfig,
    scoring: Arc<PrScoringRegistry>,
    user_id: Uuid,
    graph: Option<WorkoutGraph>,
}

impl WorkoutRuntime {
    /// Runtime for `user_id` backed by `repository`
    #[must_use]
    pub fn new(repository: Arc<dyn WorkoutRepository>, user_id: Uuid, config: WorkoutConfig) -> Self {
        let scoring = Arc::new(PrScoringRegistry::with_defaults(
            config.one_rep_max_algorithm,
        ));
        Self {
            repository,
            config,
            scoring,
            user_id,
            graph: None,
        }
    }

    /// Use a custom PR scoring registry for sessions started afterwards
    #[must_use]
    pub fn with_scoring(mut self, scoring: Arc<PrScoringRegistry>) -> Self {
        self.scoring = scoring;
        self
    }

    /// Runtime configuration
    #[must_use]
    pub const fn config(&self) -> &WorkoutConfig {
        &self.config
    }

    /// Whether a workout is active
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.graph.is_some()
    }

    /// The active workout
    #[must_use]
    pub const fn graph(&self) -> Option<&WorkoutGraph> {
        self.graph.as_ref()
    }

    /// The active workout, for mutation
    pub fn graph_mut(&mut self) -> Option<&mut WorkoutGraph> {
        self.graph.as_mut()
    }

    fn builder(&self, started_at: DateTime<Utc>) -> GraphBuilder {
        GraphBuilder::new(self.user_id, self.config.clone())
            .with_scoring(Arc::clone(&self.scoring))
            .started_at(started_at)
    }

    /// Start a workout from a persisted routine, replacing any active one
    ///
    /// # Errors
    ///
    /// Returns the repository error when the routine cannot be fetched; the previously
    /// active workout, if any, is left untouched
    pub async fn start_from_routine(
        &mut self,
        routine_id: &RoutineId,
        now: DateTime<Utc>,
    ) -> AppResult<&WorkoutGraph> {
        let repository = Arc::clone(&self.repository);
        let user_id = self.user_id;
        let routine = repository.fetch_routine(routine_id).await?;

        let mut graph = self.builder(now).build(&routine);
        let task = graph.history_task(routine.exercise_definition_ids());
        let performed = async {
            LoadOutcome::from_result(
                repository
                    .has_performed_routine(user_id, routine_id)
                    .await,
            )
            .best_effort("performed before")
        };
        let (batch, performed) = tokio::join!(task.run(repository.as_ref()), performed);

        graph.apply_history_batch(batch);
        graph.set_previously_performed(performed);
        if let Some(previous) = &self.graph {
            info!(session = %previous.instance_id(), "Replacing active workout");
        }
        info!(
            session = %graph.instance_id(),
            routine = %routine.id,
            blocks = graph.block_order().len(),
            sets = graph.set_count(),
            previously_performed = performed,
            "Started workout from routine"
        );
        let graph: &WorkoutGraph = self.graph.insert(graph);
        Ok(graph)
    }

    /// Start a workout with no blocks, replacing any active one
    pub fn start_empty(&mut self, name: &str, now: DateTime<Utc>) -> &WorkoutGraph {
        let graph = self.builder(now).build_empty(name);
        info!(session = %graph.instance_id(), routine = %graph.session().routine_id, "Started empty workout");
        self.graph.insert(graph)
    }

    /// Run a history task and merge its result
    ///
    /// Returns `false` when the task belongs to a workout that is no longer active.
    pub async fn run_history_task(&mut self, task: HistoryLoadTask) -> bool {
        if task.is_empty() {
            return false;
        }
        let repository = Arc::clone(&self.repository);
        let batch = task.run(repository.as_ref()).await;
        self.apply_history(batch)
    }

    /// Merge a history batch into the active workout if it still belongs to it
    pub fn apply_history(&mut self, batch: HistoryBatch) -> bool {
        self.graph
            .as_mut()
            .is_some_and(|graph| graph.apply_history_batch(batch))
    }

    /// Commit the active workout; on success the workout is cleared
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` with no active workout, or the repository error when the
    /// commit fails, in which case the workout stays active for a retry
    pub async fn finish(&mut self, now: DateTime<Utc>) -> AppResult<String> {
        let Some(graph) = self.graph.as_mut() else {
            return Err(AppError::invalid_state("No active workout to finish"));
        };
        graph.session.finished_at = Some(now);
        graph.refresh_totals();
        let payload = graph.to_finished_session(now);
        let instance_id = graph.instance_id();

        match self.repository.commit_session(payload).await {
            Ok(persisted_id) => {
                self.graph = None;
                info!(session = %instance_id, persisted = %persisted_id, "Finished workout");
                Ok(persisted_id)
            }
            Err(error) => {
                if let Some(graph) = self.graph.as_mut() {
                    graph.session.finished_at = None;
                }
                warn!(session = %instance_id, error = %error, "Workout commit failed, keeping session");
                Err(error)
            }
        }
    }

    /// Drop the active workout without saving; returns `false` if none was active
    pub fn discard(&mut self) -> bool {
        match self.graph.take() {
            Some(graph) => {
                info!(session = %graph.instance_id(), "Discarded workout");
                true
            }
            None => false,
        }
    }
}
