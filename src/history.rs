// ABOUTME: Asynchronous side loads of previous-set history and current personal records
// ABOUTME: Produces batches tagged with the session instance so stale results are discarded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # History Loads
//!
//! Adding or replacing exercises returns a [`HistoryLoadTask`] instead of starting I/O.
//! The owner of the graph runs the task against the repository and hands the resulting
//! [`HistoryBatch`] back to the graph. A batch built for an earlier session instance is
//! dropped on arrival.

use std::collections::HashMap;

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::graph::WorkoutGraph;
use crate::models::{ExerciseDefinitionId, PrSnapshot, PreviousSet, SessionInstanceId};
use crate::repository::{LoadOutcome, WorkoutRepository};

/// Pending history lookup for a set of exercise definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLoadTask {
    /// Session the results belong to
    pub instance_id: SessionInstanceId,
    /// Owning user
    pub user_id: Uuid,
    /// Definitions to load
    pub exercise_ids: Vec<ExerciseDefinitionId>,
    /// Previous sets per definition
    pub limit: usize,
}

/// Loaded history ready to be merged into a graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryBatch {
    /// Session the results belong to
    pub instance_id: SessionInstanceId,
    /// Previous sets per definition, newest first; empty on failed loads
    pub previous_sets: HashMap<ExerciseDefinitionId, Vec<PreviousSet>>,
    /// Current records of the definitions that have one
    pub current_prs: HashMap<ExerciseDefinitionId, PrSnapshot>,
}

impl HistoryLoadTask {
    /// Whether there is nothing to load
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercise_ids.is_empty()
    }

    /// Load history and records concurrently; lookup failures yield empty values
    pub async fn run(self, repository: &dyn WorkoutRepository) -> HistoryBatch {
        let Self {
            instance_id,
            user_id,
            exercise_ids,
            limit,
        } = self;

        let history_loads = join_all(exercise_ids.iter().map(|exercise_id| async move {
            let outcome = match repository
                .fetch_previous_sets(user_id, exercise_id, limit)
                .await
            {
                Ok(sets) if sets.len() > limit => LoadOutcome::Degraded {
                    reason: format!("{} sets returned for a limit of {limit}", sets.len()),
                    value: sets.into_iter().take(limit).collect(),
                },
                result => LoadOutcome::from_result(result),
            };
            (exercise_id.clone(), outcome.best_effort("previous sets"))
        }));
        let pr_load = async {
            if exercise_ids.is_empty() {
                return HashMap::new();
            }
            let outcome = match repository.fetch_current_prs(user_id, &exercise_ids).await {
                Ok(records) => {
                    let returned = records.len();
                    let matching: HashMap<ExerciseDefinitionId, PrSnapshot> = records
                        .into_iter()
                        .filter(|(id, record)| record.exercise_id == *id)
                        .collect();
                    if matching.len() == returned {
                        LoadOutcome::Loaded(matching)
                    } else {
                        LoadOutcome::Degraded {
                            reason: format!(
                                "{} records keyed under another exercise",
                                returned - matching.len()
                            ),
                            value: matching,
                        }
                    }
                }
                Err(error) => LoadOutcome::Failed(error),
            };
            outcome.best_effort("current personal records")
        };

        let (previous_sets, current_prs) = tokio::join!(history_loads, pr_load);
        HistoryBatch {
            instance_id,
            previous_sets: previous_sets.into_iter().collect(),
            current_prs,
        }
    }
}

impl WorkoutGraph {
    /// History task for `exercise_ids` bound to this session
    #[must_use]
    pub fn history_task(&self, exercise_ids: Vec<ExerciseDefinitionId>) -> HistoryLoadTask {
        HistoryLoadTask {
            instance_id: self.session.instance_id,
            user_id: self.session.user_id,
            exercise_ids,
            limit: self.config.previous_set_history_limit,
        }
    }

    /// Merge a loaded batch; returns `false` if it belongs to another session instance
    pub fn apply_history_batch(&mut self, batch: HistoryBatch) -> bool {
        if batch.instance_id != self.session.instance_id {
            debug!(
                batch = %batch.instance_id,
                session = %self.session.instance_id,
                "Discarding history batch of a previous session"
            );
            return false;
        }
        for (exercise_id, sets) in batch.previous_sets {
            self.previous_sets.insert(exercise_id, sets);
        }
        for entry in self.entries.values_mut() {
            if let Some(record) = batch.current_prs.get(&entry.exercise.id) {
                entry.current_pr = Some(record.clone());
            }
        }
        true
    }
}
