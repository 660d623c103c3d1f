// ABOUTME: Exercise operations: replace, delete, reorder, and notes
// ABOUTME: Deleting the last exercise removes its block; one survivor demotes a superset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::debug;

use super::blocks::is_permutation;
use crate::graph::WorkoutGraph;
use crate::history::HistoryLoadTask;
use crate::models::{BlockId, EntryId, ExerciseDefinition};

impl WorkoutGraph {
    /// Swap the exercise definition of an entry
    ///
    /// The entry keeps its position and its sets keep their values, completion, and order.
    /// The entry is re-keyed and its sets lose any personal-record flag; the old
    /// definition's session best is re-derived from its remaining sets.
    pub fn replace_exercise(
        &mut self,
        entry_id: EntryId,
        exercise: ExerciseDefinition,
    ) -> Option<HistoryLoadTask> {
        let Some(mut entry) = self.entries.remove(&entry_id) else {
            debug!(entry = %entry_id, "Ignoring replacement of missing entry");
            return None;
        };
        let old_definition = entry.exercise.id.clone();
        let new_definition = exercise.id.clone();
        let new_entry_id = self.ids.entry();
        let block_id = entry.block_id;

        entry.id = new_entry_id;
        entry.current_pr = self.historical_pr(&new_definition).cloned();
        entry.exercise = exercise;
        entry.notes = None;
        entry.replaced = true;
        self.entries.insert(new_entry_id, entry);

        if let Some(list) = self.block_entries.get_mut(&block_id) {
            for id in list.iter_mut().filter(|id| **id == entry_id) {
                *id = new_entry_id;
            }
        }
        let set_ids = self.entry_sets.remove(&entry_id).unwrap_or_default();
        for set_id in &set_ids {
            if let Some(set) = self.sets.get_mut(set_id) {
                set.entry_id = new_entry_id;
                set.personal_record = false;
            }
        }
        self.entry_sets.insert(new_entry_id, set_ids.clone());

        if self
            .session_bests
            .get(&old_definition)
            .is_some_and(|best| set_ids.contains(&best.set_id))
        {
            self.session_bests.remove(&old_definition);
            self.promote_session_best(&old_definition);
        }
        // Moved completed sets now compete for the new definition's record.
        if let Some(best) = self.session_bests.remove(&new_definition) {
            if let Some(set) = self.sets.get_mut(&best.set_id) {
                set.personal_record = false;
            }
        }
        self.promote_session_best(&new_definition);
        if let Some(block) = self.blocks.get_mut(&block_id) {
            block.modified_during_workout = true;
        }

        self.end_operation();
        debug!(old = %entry_id, new = %new_entry_id, exercise = %new_definition, "Replaced exercise");
        Some(self.history_task(vec![new_definition]))
    }

    /// Replace the exercise the cursor points at
    pub fn replace_exercise_at_cursor(
        &mut self,
        exercise: ExerciseDefinition,
    ) -> Option<HistoryLoadTask> {
        let Some(entry_id) = self.cursor.entry_id else {
            debug!("Ignoring replacement without a selected exercise");
            return None;
        };
        self.replace_exercise(entry_id, exercise)
    }

    /// Remove an exercise and its sets
    pub fn delete_exercise(&mut self, entry_id: EntryId) -> bool {
        let Some((entry, removed_sets)) = self.detach_entry(entry_id) else {
            debug!(entry = %entry_id, "Ignoring delete of missing entry");
            return false;
        };
        let block_id = entry.block_id;
        if self.entry_ids(block_id).is_empty() {
            self.detach_block(block_id);
            self.reindex_blocks();
        } else {
            self.reindex_entries(block_id);
            if let Some(block) = self.blocks.get_mut(&block_id) {
                block.modified_during_workout = true;
            }
            self.demote_if_single(block_id);
        }
        self.reconcile_session_bests();
        self.refresh_totals();
        self.end_operation();
        debug!(entry = %entry_id, removed_sets, "Deleted exercise");
        true
    }

    /// Replace the exercise order of a block; `order` must be a permutation of it
    pub fn reorder_exercises(&mut self, block_id: BlockId, order: Vec<EntryId>) -> bool {
        let current = self.entry_ids(block_id);
        if !self.blocks.contains_key(&block_id) || !is_permutation(current, &order) {
            debug!(block = %block_id, "Ignoring exercise reorder that is not a permutation");
            return false;
        }
        let changed = current != order.as_slice();
        self.block_entries.insert(block_id, order);
        self.reindex_entries(block_id);
        if changed {
            if let Some(block) = self.blocks.get_mut(&block_id) {
                block.modified_during_workout = true;
            }
        }
        self.end_operation();
        true
    }

    /// Replace the notes of an entry
    pub fn update_entry_notes(&mut self, entry_id: EntryId, notes: Option<String>) -> bool {
        let Some(entry) = self.entries.get_mut(&entry_id) else {
            debug!(entry = %entry_id, "Ignoring notes update of missing entry");
            return false;
        };
        entry.notes = notes.filter(|text| !text.trim().is_empty());
        self.end_operation();
        true
    }
}
