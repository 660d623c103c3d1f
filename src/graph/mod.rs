// ABOUTME: Normalized in-memory graph of an active workout with O(1) lookups and ordered indexes
// ABOUTME: Owns session, blocks, exercise entries, sets, session-best PRs, rest timer, and cursor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Graph
//!
//! Entities live in typed-id maps (`blocks`, `entries`, `sets`). Containment and ordering
//! live in index lists beside them:
//!
//! - `block_order`: blocks in display order
//! - `block_entries`: entries of each block in order
//! - `entry_sets`: sets of each entry in order
//!
//! Every entity's `order_index` equals its position in the owning index list, and every
//! primary map change goes through a helper that updates the matching index. Callers only
//! ever get shared references; all writes go through the mutation methods defined in
//! `crate::mutations`, `crate::pr_tracker`, `crate::autofill`, and `crate::history`.

/// Session, block, entry, set, and session-best entities
pub mod entities;

/// Structural consistency checks
pub mod consistency;

/// Transient UI cursor
pub mod cursor;

/// Finished-session payload
pub mod finish;

/// Rest timer state
pub mod rest_timer;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use pierre_workout_intelligence::PrScoringRegistry;

use crate::config::WorkoutConfig;
use crate::models::{
    BlockId, BlockType, EntryId, ExerciseDefinitionId, MeasurementTemplate, PrSnapshot,
    PreviousSet, SessionInstanceId, SessionTotals, SetId, TempIdAllocator,
};

pub use consistency::ConsistencyError;
pub use cursor::WorkoutCursor;
pub use entities::{Block, ExerciseEntry, Session, SessionBest, WorkoutSet};
pub use rest_timer::{RestDecision, RestKind, RestTimer};

/// In-memory graph of one active workout
#[derive(Debug, Clone)]
pub struct WorkoutGraph {
    pub(crate) ids: TempIdAllocator,
    pub(crate) config: WorkoutConfig,
    pub(crate) scoring: Arc<PrScoringRegistry>,
    pub(crate) session: Session,
    pub(crate) blocks: HashMap<BlockId, Block>,
    pub(crate) entries: HashMap<EntryId, ExerciseEntry>,
    pub(crate) sets: HashMap<SetId, WorkoutSet>,
    pub(crate) block_order: Vec<BlockId>,
    pub(crate) block_entries: HashMap<BlockId, Vec<EntryId>>,
    pub(crate) entry_sets: HashMap<EntryId, Vec<SetId>>,
    pub(crate) previous_sets: HashMap<ExerciseDefinitionId, Vec<PreviousSet>>,
    pub(crate) session_bests: HashMap<ExerciseDefinitionId, SessionBest>,
    pub(crate) rest_timer: Option<RestTimer>,
    pub(crate) cursor: WorkoutCursor,
}

impl WorkoutGraph {
    pub(crate) fn new(
        session: Session,
        config: WorkoutConfig,
        scoring: Arc<PrScoringRegistry>,
    ) -> Self {
        Self {
            ids: TempIdAllocator::new(),
            config,
            scoring,
            session,
            blocks: HashMap::new(),
            entries: HashMap::new(),
            sets: HashMap::new(),
            block_order: Vec::new(),
            block_entries: HashMap::new(),
            entry_sets: HashMap::new(),
            previous_sets: HashMap::new(),
            session_bests: HashMap::new(),
            rest_timer: None,
            cursor: WorkoutCursor::default(),
        }
    }

    // ------------------------------------------------------------------
    // Read view
    // ------------------------------------------------------------------

    /// The session
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Identity of this session instance
    #[must_use]
    pub const fn instance_id(&self) -> SessionInstanceId {
        self.session.instance_id
    }

    /// Configuration the graph was built with
    #[must_use]
    pub const fn config(&self) -> &WorkoutConfig {
        &self.config
    }

    /// Look up a block
    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    /// Block ids in display order
    #[must_use]
    pub fn block_order(&self) -> &[BlockId] {
        &self.block_order
    }

    /// Blocks in display order
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.block_order.iter().filter_map(|id| self.blocks.get(id))
    }

    /// Look up an exercise entry
    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&ExerciseEntry> {
        self.entries.get(&id)
    }

    /// Entry ids of a block in order; empty for unknown blocks
    #[must_use]
    pub fn entry_ids(&self, block_id: BlockId) -> &[EntryId] {
        self.block_entries
            .get(&block_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Entries of a block in order
    pub fn entries_in_block(&self, block_id: BlockId) -> impl Iterator<Item = &ExerciseEntry> + '_ {
        self.entry_ids(block_id)
            .iter()
            .filter_map(|id| self.entries.get(id))
    }

    /// Look up a set
    #[must_use]
    pub fn set(&self, id: SetId) -> Option<&WorkoutSet> {
        self.sets.get(&id)
    }

    /// Set ids of an entry in order; empty for unknown entries
    #[must_use]
    pub fn set_ids(&self, entry_id: EntryId) -> &[SetId] {
        self.entry_sets.get(&entry_id).map_or(&[], Vec::as_slice)
    }

    /// Sets of an entry in order
    pub fn sets_for_entry(&self, entry_id: EntryId) -> impl Iterator<Item = &WorkoutSet> + '_ {
        self.set_ids(entry_id)
            .iter()
            .filter_map(|id| self.sets.get(id))
    }

    /// Number of sets in the graph
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Previous-set history of an exercise definition, most recent first
    #[must_use]
    pub fn previous_sets(&self, exercise_id: &ExerciseDefinitionId) -> &[PreviousSet] {
        self.previous_sets
            .get(exercise_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Whether history has been loaded for an exercise definition
    #[must_use]
    pub fn has_history_for(&self, exercise_id: &ExerciseDefinitionId) -> bool {
        self.previous_sets.contains_key(exercise_id)
    }

    /// Session-best record of an exercise definition
    #[must_use]
    pub fn session_best(&self, exercise_id: &ExerciseDefinitionId) -> Option<&SessionBest> {
        self.session_bests.get(exercise_id)
    }

    /// All session-best records
    #[must_use]
    pub const fn session_bests(&self) -> &HashMap<ExerciseDefinitionId, SessionBest> {
        &self.session_bests
    }

    /// The rest timer, if one has been started
    #[must_use]
    pub const fn rest_timer(&self) -> Option<&RestTimer> {
        self.rest_timer.as_ref()
    }

    /// The transient UI cursor
    #[must_use]
    pub const fn cursor(&self) -> &WorkoutCursor {
        &self.cursor
    }

    /// Distinct exercise definitions in the graph, in display order
    #[must_use]
    pub fn exercise_definition_ids(&self) -> Vec<ExerciseDefinitionId> {
        let mut ids: Vec<ExerciseDefinitionId> = Vec::new();
        for block_id in &self.block_order {
            for entry in self.entries_in_block(*block_id) {
                if !ids.contains(&entry.exercise.id) {
                    ids.push(entry.exercise.id.clone());
                }
            }
        }
        ids
    }

    /// Whether the structure diverged from the routine the session started from
    #[must_use]
    pub fn has_structural_changes(&self) -> bool {
        self.sets.len() != self.session.original_set_count
            || self
                .blocks
                .values()
                .any(|block| block.added_during_workout || block.modified_during_workout)
    }

    // ------------------------------------------------------------------
    // Cursor and rest timer
    // ------------------------------------------------------------------

    /// Point the cursor at a new selection
    pub fn set_cursor(&mut self, cursor: WorkoutCursor) {
        self.cursor = cursor;
    }

    /// Stop the rest timer; returns `false` if none was running
    pub fn skip_rest_timer(&mut self) -> bool {
        match self.rest_timer.as_mut() {
            Some(timer) if timer.active => {
                timer.active = false;
                true
            }
            _ => false,
        }
    }

    /// Add or remove seconds from the running rest timer
    pub fn adjust_rest_timer(&mut self, delta_secs: i64, now: DateTime<Utc>) -> bool {
        match self.rest_timer.as_mut() {
            Some(timer) if timer.active => {
                timer.adjust(delta_secs, now);
                true
            }
            _ => false,
        }
    }

    /// Start a rest timer, or restart the running one in place
    pub(crate) fn start_rest_timer(
        &mut self,
        block_id: BlockId,
        decision: RestDecision,
        now: DateTime<Utc>,
    ) {
        match self.rest_timer.as_mut() {
            Some(timer) if timer.active => timer.restart(block_id, decision, now),
            _ => self.rest_timer = Some(RestTimer::start(block_id, decision, now)),
        }
    }

    /// Merge the "performed before" lookup result
    pub fn set_previously_performed(&mut self, performed: bool) {
        self.session.previously_performed = performed;
    }

    // ------------------------------------------------------------------
    // Structural helpers shared by the mutation modules
    // ------------------------------------------------------------------

    pub(crate) fn end_operation(&mut self) {
        self.cursor.clear();
    }

    /// Insert a block at `position` (clamped) with an empty entry list
    pub(crate) fn insert_block(&mut self, mut block: Block, position: usize) -> BlockId {
        let id = block.id;
        let position = position.min(self.block_order.len());
        block.order_index = position;
        self.block_order.insert(position, id);
        self.block_entries.insert(id, Vec::new());
        self.blocks.insert(id, block);
        self.reindex_blocks();
        id
    }

    /// Append an entry to its block's entry list with an empty set list
    pub(crate) fn append_entry(&mut self, mut entry: ExerciseEntry) -> Option<EntryId> {
        let id = entry.id;
        let list = self.block_entries.get_mut(&entry.block_id)?;
        entry.order_index = list.len();
        list.push(id);
        self.entry_sets.insert(id, Vec::new());
        self.entries.insert(id, entry);
        Some(id)
    }

    /// Append a set to its entry's set list
    pub(crate) fn append_set(&mut self, mut set: WorkoutSet) -> Option<SetId> {
        let id = set.id;
        let list = self.entry_sets.get_mut(&set.entry_id)?;
        set.order_index = list.len();
        list.push(id);
        self.sets.insert(id, set);
        self.session.totals.planned_sets = self.sets.len();
        Some(id)
    }

    /// Append `count` blank sets using `template`
    pub(crate) fn append_blank_sets(
        &mut self,
        entry_id: EntryId,
        template: MeasurementTemplate,
        count: usize,
    ) {
        for _ in 0..count {
            let set_id = self.ids.set();
            let _ = self.append_set(WorkoutSet::blank(set_id, entry_id, 0, template));
        }
    }

    /// Remove a set from the primary map and its entry's list, without re-indexing
    pub(crate) fn detach_set(&mut self, set_id: SetId) -> Option<WorkoutSet> {
        let set = self.sets.remove(&set_id)?;
        if let Some(list) = self.entry_sets.get_mut(&set.entry_id) {
            list.retain(|id| *id != set_id);
        }
        self.session.totals.planned_sets = self.sets.len();
        Some(set)
    }

    /// Remove an entry and all of its sets; returns the number of sets removed
    pub(crate) fn detach_entry(&mut self, entry_id: EntryId) -> Option<(ExerciseEntry, usize)> {
        let entry = self.entries.remove(&entry_id)?;
        let set_ids = self.entry_sets.remove(&entry_id).unwrap_or_default();
        for set_id in &set_ids {
            self.sets.remove(set_id);
        }
        if let Some(list) = self.block_entries.get_mut(&entry.block_id) {
            list.retain(|id| *id != entry_id);
        }
        self.session.totals.planned_sets = self.sets.len();
        Some((entry, set_ids.len()))
    }

    /// Remove a block with all entries and sets; returns the number of sets removed
    pub(crate) fn detach_block(&mut self, block_id: BlockId) -> Option<(Block, usize)> {
        let block = self.blocks.remove(&block_id)?;
        let entry_ids = self.block_entries.remove(&block_id).unwrap_or_default();
        let mut removed_sets = 0;
        for entry_id in entry_ids {
            self.entries.remove(&entry_id);
            for set_id in self.entry_sets.remove(&entry_id).unwrap_or_default() {
                self.sets.remove(&set_id);
                removed_sets += 1;
            }
        }
        self.block_order.retain(|id| *id != block_id);
        self.session.totals.planned_sets = self.sets.len();
        if self
            .rest_timer
            .as_ref()
            .is_some_and(|timer| timer.block_id == block_id)
        {
            self.rest_timer = None;
        }
        Some((block, removed_sets))
    }

    pub(crate) fn reindex_blocks(&mut self) {
        for (position, id) in self.block_order.iter().enumerate() {
            if let Some(block) = self.blocks.get_mut(id) {
                block.order_index = position;
            }
        }
    }

    pub(crate) fn reindex_entries(&mut self, block_id: BlockId) {
        let Some(list) = self.block_entries.get(&block_id) else {
            return;
        };
        for (position, id) in list.iter().enumerate() {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.order_index = position;
            }
        }
    }

    pub(crate) fn reindex_sets(&mut self, entry_id: EntryId) {
        let Some(list) = self.entry_sets.get(&entry_id) else {
            return;
        };
        for (position, id) in list.iter().enumerate() {
            if let Some(set) = self.sets.get_mut(id) {
                set.order_index = position;
            }
        }
    }

    /// Promote an `individual` block holding several exercises to a superset
    ///
    /// Supersets chain exercises back to back, so the rest between exercises is zeroed.
    pub(crate) fn promote_if_multi(&mut self, block_id: BlockId) {
        let count = self.entry_ids(block_id).len();
        let Some(block) = self.blocks.get_mut(&block_id) else {
            return;
        };
        if block.block_type == BlockType::Individual && count >= 2 {
            block.block_type = BlockType::Superset;
            block.rest_between_exercises_secs = 0;
            block.modified_during_workout = true;
        }
    }

    /// Demote a superset or circuit reduced to a single exercise
    pub(crate) fn demote_if_single(&mut self, block_id: BlockId) {
        let count = self.entry_ids(block_id).len();
        let Some(block) = self.blocks.get_mut(&block_id) else {
            return;
        };
        if block.block_type.is_multi_exercise() && count == 1 {
            block.block_type = BlockType::Individual;
            block.rest_between_exercises_secs = 0;
            block.modified_during_workout = true;
        }
    }

    /// Recompute the provisional session aggregates
    pub(crate) fn refresh_totals(&mut self) {
        let mut completed = 0;
        let mut volume = 0.0;
        let mut rpe_sum = 0.0;
        let mut rpe_count = 0_u32;
        for set in self.sets.values().filter(|set| set.completed) {
            completed += 1;
            if set.template == MeasurementTemplate::WeightReps {
                if let (Some(weight), Some(reps)) = (set.actual_primary, set.actual_secondary) {
                    volume += weight * reps;
                }
            }
            if let Some(rpe) = set.actual_rpe {
                rpe_sum += rpe;
                rpe_count += 1;
            }
        }
        self.session.totals = SessionTotals {
            planned_sets: self.sets.len(),
            completed_sets: completed,
            total_volume: volume,
            average_rpe: (rpe_count > 0).then(|| rpe_sum / f64::from(rpe_count)),
        };
    }

    /// Exercise definition a set belongs to
    pub(crate) fn definition_of_set(&self, set_id: SetId) -> Option<&ExerciseDefinitionId> {
        let set = self.sets.get(&set_id)?;
        self.entries
            .get(&set.entry_id)
            .map(|entry| &entry.exercise.id)
    }

    /// Persisted all-time record of an exercise definition
    pub(crate) fn historical_pr(&self, exercise_id: &ExerciseDefinitionId) -> Option<&PrSnapshot> {
        self.entries
            .values()
            .filter(|entry| entry.exercise.id == *exercise_id)
            .find_map(|entry| entry.current_pr.as_ref())
    }

    /// Sets of every entry using an exercise definition, in display order
    pub(crate) fn sets_of_definition(&self, exercise_id: &ExerciseDefinitionId) -> Vec<SetId> {
        let mut result = Vec::new();
        for block_id in &self.block_order {
            for entry in self.entries_in_block(*block_id) {
                if entry.exercise.id == *exercise_id {
                    result.extend_from_slice(self.set_ids(entry.id));
                }
            }
        }
        result
    }

    /// Earliest completion time among an entry's completed sets
    pub(crate) fn refresh_first_completed_at(&mut self, entry_id: EntryId) {
        let earliest = self
            .sets_for_entry(entry_id)
            .filter_map(|set| set.completed_at)
            .min();
        if let Some(entry) = self.entries.get_mut(&entry_id) {
            entry.first_completed_at = earliest;
        }
    }
}
