// ABOUTME: Block operations: add, delete, convert to individual, reorder, and rest edits
// ABOUTME: Keeps block order, planned set count, and block-type invariant in sync
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{BlockAddition, NewBlockKind};
use crate::graph::{Block, ExerciseEntry, RestKind, WorkoutGraph};
use crate::history::HistoryLoadTask;
use crate::models::{BlockId, BlockType, ExerciseDefinition, ExerciseDefinitionId, SetId};

impl WorkoutGraph {
    /// Append new blocks holding `exercises`, each with the default number of empty sets
    ///
    /// `Individual` creates one block per exercise; `Superset` and `Circuit` create one
    /// block holding all of them. Returns `None` when `exercises` is empty.
    pub fn add_blocks(
        &mut self,
        kind: NewBlockKind,
        exercises: Vec<ExerciseDefinition>,
    ) -> Option<BlockAddition> {
        if exercises.is_empty() {
            return None;
        }
        let definitions = distinct_definitions(&exercises);
        let groups: Vec<Vec<ExerciseDefinition>> = match kind {
            NewBlockKind::Individual => exercises.into_iter().map(|e| vec![e]).collect(),
            NewBlockKind::Superset | NewBlockKind::Circuit => vec![exercises],
        };

        let mut block_ids = Vec::with_capacity(groups.len());
        for group in groups {
            let block_id = self.ids.block();
            let rest_between_exercises_secs = if kind == NewBlockKind::Circuit {
                self.config.default_rest_between_exercises_secs
            } else {
                0
            };
            self.insert_block(
                Block {
                    id: block_id,
                    block_type: kind.into(),
                    name: None,
                    order_index: 0,
                    rest_between_sets_secs: self.config.default_rest_between_sets_secs,
                    rest_between_exercises_secs,
                    added_during_workout: true,
                    modified_during_workout: false,
                },
                usize::MAX,
            );
            for exercise in group {
                self.add_entry_with_default_sets(block_id, exercise);
            }
            self.demote_if_single(block_id);
            if let Some(block) = self.blocks.get_mut(&block_id) {
                block.modified_during_workout = false;
            }
            block_ids.push(block_id);
        }

        self.refresh_totals();
        self.end_operation();
        debug!(blocks = block_ids.len(), ?kind, "Added blocks");
        Some(BlockAddition {
            block_ids,
            history: self.history_task(definitions),
        })
    }

    /// Append `exercises` to an existing block; an individual block becomes a superset
    pub fn add_exercises_to_block(
        &mut self,
        block_id: BlockId,
        exercises: Vec<ExerciseDefinition>,
    ) -> Option<HistoryLoadTask> {
        if exercises.is_empty() || !self.blocks.contains_key(&block_id) {
            debug!(block = %block_id, "Ignoring exercise addition to missing block");
            return None;
        }
        let definitions = distinct_definitions(&exercises);
        for exercise in exercises {
            self.add_entry_with_default_sets(block_id, exercise);
        }
        if let Some(block) = self.blocks.get_mut(&block_id) {
            block.modified_during_workout = true;
        }
        self.promote_if_multi(block_id);
        self.refresh_totals();
        self.end_operation();
        Some(self.history_task(definitions))
    }

    /// Remove a block with all its exercises and sets
    pub fn delete_block(&mut self, block_id: BlockId) -> bool {
        let Some((_, removed_sets)) = self.detach_block(block_id) else {
            debug!(block = %block_id, "Ignoring delete of missing block");
            return false;
        };
        self.reindex_blocks();
        self.reconcile_session_bests();
        self.refresh_totals();
        self.end_operation();
        debug!(block = %block_id, removed_sets, "Deleted block");
        true
    }

    /// Split a superset or circuit into one individual block per exercise
    ///
    /// The new blocks take the original position. Entries and sets are re-keyed; set data,
    /// completion, and session-best records carry over.
    pub fn convert_block_to_individual(&mut self, block_id: BlockId) -> Option<Vec<BlockId>> {
        let block = self.blocks.get(&block_id)?;
        if block.block_type == BlockType::Individual {
            return None;
        }
        let template = block.clone();
        let position = template.order_index;
        let entries: Vec<ExerciseEntry> = self.entries_in_block(block_id).cloned().collect();
        let sets: HashMap<_, Vec<_>> = entries
            .iter()
            .map(|entry| (entry.id, self.sets_for_entry(entry.id).cloned().collect()))
            .collect();
        let timer = self.rest_timer.clone();

        self.detach_block(block_id);

        let mut set_ids: HashMap<SetId, SetId> = HashMap::new();
        let mut new_blocks = Vec::with_capacity(entries.len());
        for (offset, mut entry) in entries.into_iter().enumerate() {
            let new_block_id = self.ids.block();
            self.insert_block(
                Block {
                    id: new_block_id,
                    block_type: BlockType::Individual,
                    name: None,
                    order_index: 0,
                    rest_between_sets_secs: template.rest_between_sets_secs,
                    rest_between_exercises_secs: 0,
                    added_during_workout: template.added_during_workout,
                    modified_during_workout: true,
                },
                position + offset,
            );
            let old_entry_id = entry.id;
            entry.id = self.ids.entry();
            entry.block_id = new_block_id;
            let new_entry_id = entry.id;
            if self.append_entry(entry).is_none() {
                continue;
            }
            for mut set in sets.get(&old_entry_id).cloned().unwrap_or_default() {
                let new_set_id = self.ids.set();
                set_ids.insert(set.id, new_set_id);
                set.id = new_set_id;
                set.entry_id = new_entry_id;
                let _ = self.append_set(set);
            }
            new_blocks.push(new_block_id);
        }

        for best in self.session_bests.values_mut() {
            if let Some(new_id) = set_ids.get(&best.set_id) {
                best.set_id = *new_id;
            }
        }
        if let (Some(mut timer), Some(first)) = (timer, new_blocks.first()) {
            if timer.block_id == block_id {
                timer.block_id = *first;
            }
            self.rest_timer = Some(timer);
        }

        self.reindex_blocks();
        self.refresh_totals();
        self.end_operation();
        Some(new_blocks)
    }

    /// Replace the block order; `order` must be a permutation of the current order
    pub fn reorder_blocks(&mut self, order: Vec<BlockId>) -> bool {
        if !is_permutation(&self.block_order, &order) {
            debug!("Ignoring block reorder that is not a permutation");
            return false;
        }
        self.block_order = order;
        self.reindex_blocks();
        self.end_operation();
        true
    }

    /// Set one of a block's rest durations
    pub fn update_block_rest(&mut self, block_id: BlockId, kind: RestKind, secs: u32) -> bool {
        let Some(block) = self.blocks.get_mut(&block_id) else {
            debug!(block = %block_id, "Ignoring rest update of missing block");
            return false;
        };
        match kind {
            RestKind::BetweenSets => block.rest_between_sets_secs = secs,
            RestKind::BetweenExercises => block.rest_between_exercises_secs = secs,
        }
        block.modified_during_workout = true;
        self.end_operation();
        true
    }

    /// Set the rest duration the cursor points at
    pub fn update_rest_at_cursor(&mut self, secs: u32) -> bool {
        let (Some(block_id), Some(kind)) = (self.cursor.block_id, self.cursor.rest_kind) else {
            debug!("Ignoring rest update without a rest cursor");
            return false;
        };
        self.update_block_rest(block_id, kind, secs)
    }

    pub(crate) fn add_entry_with_default_sets(
        &mut self,
        block_id: BlockId,
        exercise: ExerciseDefinition,
    ) {
        let template = exercise.default_template;
        let current_pr = self.historical_pr(&exercise.id).cloned();
        let entry_id = self.ids.entry();
        let appended = self.append_entry(ExerciseEntry {
            id: entry_id,
            block_id,
            exercise,
            order_index: 0,
            first_completed_at: None,
            notes: None,
            current_pr,
            added_during_workout: true,
            replaced: false,
        });
        if appended.is_some() {
            self.append_blank_sets(entry_id, template, self.config.default_sets_per_exercise);
        }
    }
}

pub(crate) fn distinct_definitions(exercises: &[ExerciseDefinition]) -> Vec<ExerciseDefinitionId> {
    let mut ids: Vec<ExerciseDefinitionId> = Vec::new();
    for exercise in exercises {
        if !ids.contains(&exercise.id) {
            ids.push(exercise.id.clone());
        }
    }
    ids
}

pub(crate) fn is_permutation<T: Eq + std::hash::Hash>(current: &[T], proposed: &[T]) -> bool {
    if current.len() != proposed.len() {
        return false;
    }
    let current: HashSet<&T> = current.iter().collect();
    let proposed_set: HashSet<&T> = proposed.iter().collect();
    proposed_set.len() == proposed.len() && current == proposed_set
}
