// ABOUTME: Round-major walk over circuit and superset blocks to find the next set to perform
// ABOUTME: Counts leading complete rounds and flags positions where a set must be created
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::graph::WorkoutGraph;
use crate::models::{BlockId, EntryId, SetId};

/// What exists at the next position of the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "set_id", rename_all = "snake_case")]
pub enum NextSetTarget {
    /// An incomplete set that already exists
    Existing(SetId),
    /// The exercise has no set at this round yet
    NeedsCreation,
}

/// Next position to perform in a multi-exercise block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextSetInfo {
    /// Exercise to perform
    pub entry_id: EntryId,
    /// Round index (set position)
    pub round: usize,
    /// Existing set or a creation request
    pub target: NextSetTarget,
    /// Rounds in which every exercise has a completed set
    pub completed_rounds: usize,
}

/// Progress of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BlockProgress {
    /// Something is left to do
    Next(NextSetInfo),
    /// Every set of every exercise is complete
    Complete {
        /// Number of rounds in the block
        rounds: usize,
    },
}

/// Completion state of one exercise column: set id and completed flag per round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseColumn {
    /// Exercise entry
    pub entry_id: EntryId,
    /// Sets in order
    pub sets: Vec<(SetId, bool)>,
}

impl ExerciseColumn {
    fn is_done(&self, round: usize) -> bool {
        self.sets.get(round).is_some_and(|(_, completed)| *completed)
    }
}

/// Walk `columns` round by round and return the first position that is not done
///
/// With `only` set, positions of other columns are still used to count complete rounds
/// but never returned.
#[must_use]
pub fn walk_rounds(columns: &[ExerciseColumn], only: Option<EntryId>) -> Option<BlockProgress> {
    let first = columns.first()?;
    let rounds = columns.iter().map(|c| c.sets.len()).max().unwrap_or(0);
    if rounds == 0 {
        let entry_id = only.unwrap_or(first.entry_id);
        return Some(BlockProgress::Next(NextSetInfo {
            entry_id,
            round: 0,
            target: NextSetTarget::NeedsCreation,
            completed_rounds: 0,
        }));
    }

    let completed_rounds = (0..rounds)
        .take_while(|round| columns.iter().all(|c| c.is_done(*round)))
        .count();

    for round in 0..rounds {
        for column in columns {
            if only.is_some_and(|id| id != column.entry_id) || column.is_done(round) {
                continue;
            }
            let target = column
                .sets
                .get(round)
                .map_or(NextSetTarget::NeedsCreation, |(id, _)| {
                    NextSetTarget::Existing(*id)
                });
            return Some(BlockProgress::Next(NextSetInfo {
                entry_id: column.entry_id,
                round,
                target,
                completed_rounds,
            }));
        }
    }
    Some(BlockProgress::Complete { rounds })
}

impl WorkoutGraph {
    fn exercise_columns(&self, block_id: BlockId) -> Vec<ExerciseColumn> {
        self.entry_ids(block_id)
            .iter()
            .map(|entry_id| ExerciseColumn {
                entry_id: *entry_id,
                sets: self
                    .sets_for_entry(*entry_id)
                    .map(|set| (set.id, set.completed))
                    .collect(),
            })
            .collect()
    }

    /// Next set to perform in a block; `None` for unknown or empty blocks
    #[must_use]
    pub fn next_set_in_block(&self, block_id: BlockId) -> Option<BlockProgress> {
        walk_rounds(&self.exercise_columns(block_id), None)
    }

    /// Next set to perform for one exercise of a block
    #[must_use]
    pub fn next_set_for_exercise(
        &self,
        block_id: BlockId,
        entry_id: EntryId,
    ) -> Option<BlockProgress> {
        let columns = self.exercise_columns(block_id);
        if !columns.iter().any(|c| c.entry_id == entry_id) {
            return None;
        }
        walk_rounds(&columns, Some(entry_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(entry: u64, sets: &[bool]) -> ExerciseColumn {
        ExerciseColumn {
            entry_id: EntryId::from_raw(entry),
            sets: sets
                .iter()
                .enumerate()
                .map(|(i, done)| (SetId::from_raw(entry * 100 + i as u64), *done))
                .collect(),
        }
    }

    fn next(entry: u64, round: usize, target: NextSetTarget, completed_rounds: usize) -> BlockProgress {
        BlockProgress::Next(NextSetInfo {
            entry_id: EntryId::from_raw(entry),
            round,
            target,
            completed_rounds,
        })
    }

    #[test]
    fn test_empty_block_needs_creation_at_first_exercise() {
        let columns = vec![column(1, &[]), column(2, &[])];
        assert_eq!(
            walk_rounds(&columns, None),
            Some(next(1, 0, NextSetTarget::NeedsCreation, 0))
        );
    }

    #[test]
    fn test_missing_set_counts_as_incomplete() {
        let columns = vec![column(1, &[true, false]), column(2, &[true, false]), column(3, &[true])];
        assert_eq!(
            walk_rounds(&columns, Some(EntryId::from_raw(3))),
            Some(next(3, 1, NextSetTarget::NeedsCreation, 1))
        );
        assert_eq!(
            walk_rounds(&columns, None),
            Some(next(1, 1, NextSetTarget::Existing(SetId::from_raw(101)), 1))
        );
    }

    #[test]
    fn test_all_done_reports_complete() {
        let columns = vec![column(1, &[true, true]), column(2, &[true, true])];
        assert_eq!(
            walk_rounds(&columns, None),
            Some(BlockProgress::Complete { rounds: 2 })
        );
    }

    #[test]
    fn test_round_major_order() {
        let columns = vec![column(1, &[true, false]), column(2, &[false, false])];
        assert_eq!(
            walk_rounds(&columns, None),
            Some(next(2, 0, NextSetTarget::Existing(SetId::from_raw(200)), 0))
        );
    }
}
