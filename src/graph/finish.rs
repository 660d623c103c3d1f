// ABOUTME: Conversion of the active workout graph into the finished-session payload
// ABOUTME: Reconstructs execution order and collects session-best records to persist
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::WorkoutGraph;
use crate::models::{
    EntryId, FinishedBlock, FinishedExercise, FinishedSession, FinishedSet, PersonalRecordUpdate,
};

impl WorkoutGraph {
    /// 1-based rank of each started entry by the time its first set was completed
    #[must_use]
    pub fn execution_order(&self) -> HashMap<EntryId, usize> {
        let mut started: Vec<(DateTime<Utc>, usize, EntryId)> = Vec::new();
        let mut position = 0;
        for block_id in &self.block_order {
            for entry in self.entries_in_block(*block_id) {
                if let Some(at) = entry.first_completed_at {
                    started.push((at, position, entry.id));
                }
                position += 1;
            }
        }
        started.sort_unstable();
        started
            .into_iter()
            .enumerate()
            .map(|(rank, (_, _, entry_id))| (entry_id, rank + 1))
            .collect()
    }

    /// Payload handed to the repository when the workout is finished at `finished_at`
    #[must_use]
    pub fn to_finished_session(&self, finished_at: DateTime<Utc>) -> FinishedSession {
        let execution_order = self.execution_order();
        let blocks = self
            .blocks()
            .map(|block| FinishedBlock {
                block_type: block.block_type,
                name: block.name.clone(),
                order_index: block.order_index,
                rest_between_sets_secs: block.rest_between_sets_secs,
                rest_between_exercises_secs: block.rest_between_exercises_secs,
                added_during_workout: block.added_during_workout,
                modified_during_workout: block.modified_during_workout,
                exercises: self
                    .entries_in_block(block.id)
                    .map(|entry| FinishedExercise {
                        exercise_id: entry.exercise.id.clone(),
                        name: entry.exercise.name.clone(),
                        order_index: entry.order_index,
                        execution_order: execution_order.get(&entry.id).copied(),
                        first_completed_at: entry.first_completed_at,
                        notes: entry.notes.clone(),
                        sets: self
                            .sets_for_entry(entry.id)
                            .map(|set| FinishedSet {
                                order_index: set.order_index,
                                template: set.template,
                                set_type: set.set_type,
                                planned_primary: set.planned_primary,
                                planned_primary_range: set.planned_primary_range,
                                planned_secondary: set.planned_secondary,
                                planned_secondary_range: set.planned_secondary_range,
                                planned_rpe: set.planned_rpe,
                                actual_primary: set.actual_primary,
                                actual_secondary: set.actual_secondary,
                                actual_rpe: set.actual_rpe,
                                completed: set.completed,
                                completed_at: set.completed_at,
                                personal_record: set.personal_record,
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        let mut personal_records: Vec<PersonalRecordUpdate> = self
            .session_bests
            .iter()
            .map(|(exercise_id, best)| PersonalRecordUpdate {
                exercise_id: exercise_id.clone(),
                template: best.template,
                primary_value: best.primary_value,
                secondary_value: best.secondary_value,
                score: best.score,
                achieved_at: best.created_at,
            })
            .collect();
        personal_records.sort_by(|a, b| a.exercise_id.as_str().cmp(b.exercise_id.as_str()));

        FinishedSession {
            user_id: self.session.user_id,
            routine_id: self.session.routine_id.clone(),
            routine_name: self.session.routine_name.clone(),
            started_at: self.session.started_at,
            finished_at,
            previously_performed: self.session.previously_performed,
            structure_changed: self.has_structural_changes(),
            totals: self.session.totals.clone(),
            blocks,
            personal_records,
        }
    }
}
