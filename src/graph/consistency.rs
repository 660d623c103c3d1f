// ABOUTME: Structural consistency checks between the primary maps and the ordered indexes
// ABOUTME: Reports the first violated rule as a typed ConsistencyError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use thiserror::Error;

use super::WorkoutGraph;
use crate::models::{BlockId, BlockType, EntryId, ExerciseDefinitionId, SetId};

/// A broken structural rule of the workout graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    /// Block order list does not match the block map
    #[error("block order lists {listed} blocks but {stored} are stored")]
    BlockOrderMismatch {
        /// Ids in the order list
        listed: usize,
        /// Blocks in the primary map
        stored: usize,
    },
    /// An index references an id missing from its primary map
    #[error("index references missing {kind} {id}")]
    DanglingIndex {
        /// Entity kind
        kind: &'static str,
        /// Rendered id
        id: String,
    },
    /// An entity is stored but not reachable from any index
    #[error("{kind} {id} is not indexed")]
    Unindexed {
        /// Entity kind
        kind: &'static str,
        /// Rendered id
        id: String,
    },
    /// An entity's parent id disagrees with the index that holds it
    #[error("{kind} {id} is indexed under the wrong parent")]
    WrongParent {
        /// Entity kind
        kind: &'static str,
        /// Rendered id
        id: String,
    },
    /// `order_index` differs from the position in the index list
    #[error("{kind} {id} has order index {actual}, expected {expected}")]
    OrderIndex {
        /// Entity kind
        kind: &'static str,
        /// Rendered id
        id: String,
        /// Position in the index list
        expected: usize,
        /// Stored order index
        actual: usize,
    },
    /// Exercise count does not fit the block type
    #[error("block {block} of type {block_type:?} holds {exercises} exercises")]
    BlockType {
        /// Block id
        block: BlockId,
        /// Stored type
        block_type: BlockType,
        /// Number of exercises
        exercises: usize,
    },
    /// Planned set count disagrees with the number of stored sets
    #[error("planned set count {planned} differs from {stored} stored sets")]
    PlannedCount {
        /// Session counter
        planned: usize,
        /// Sets in the primary map
        stored: usize,
    },
    /// Session best points at a missing, incomplete, unflagged, or foreign set
    #[error("session best of {exercise} is invalid: {reason}")]
    SessionBest {
        /// Exercise definition
        exercise: ExerciseDefinitionId,
        /// What is wrong
        reason: &'static str,
    },
    /// More than one set flagged as the session best of an exercise
    #[error("exercise {exercise} has {count} sets flagged as personal record")]
    DuplicatePersonalRecord {
        /// Exercise definition
        exercise: ExerciseDefinitionId,
        /// Flagged sets
        count: usize,
    },
}

impl WorkoutGraph {
    /// Verify that every index agrees with the primary maps and that derived invariants hold
    ///
    /// # Errors
    ///
    /// Returns the first violated rule
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        self.check_blocks()?;
        let indexed_entries = self.check_entries()?;
        let indexed_sets = self.check_sets(&indexed_entries)?;

        if let Some(id) = self.entries.keys().find(|id| !indexed_entries.contains(id)) {
            return Err(ConsistencyError::Unindexed {
                kind: "entry",
                id: id.to_string(),
            });
        }
        if let Some(id) = self.sets.keys().find(|id| !indexed_sets.contains(id)) {
            return Err(ConsistencyError::Unindexed {
                kind: "set",
                id: id.to_string(),
            });
        }
        if self.session.totals.planned_sets != self.sets.len() {
            return Err(ConsistencyError::PlannedCount {
                planned: self.session.totals.planned_sets,
                stored: self.sets.len(),
            });
        }
        self.check_personal_records()
    }

    fn check_blocks(&self) -> Result<(), ConsistencyError> {
        let unique: HashSet<&BlockId> = self.block_order.iter().collect();
        if unique.len() != self.block_order.len()
            || self.block_order.len() != self.blocks.len()
            || self.block_entries.len() != self.blocks.len()
        {
            return Err(ConsistencyError::BlockOrderMismatch {
                listed: self.block_order.len(),
                stored: self.blocks.len(),
            });
        }
        for (position, id) in self.block_order.iter().enumerate() {
            let block = self
                .blocks
                .get(id)
                .ok_or_else(|| ConsistencyError::DanglingIndex {
                    kind: "block",
                    id: id.to_string(),
                })?;
            if block.order_index != position {
                return Err(ConsistencyError::OrderIndex {
                    kind: "block",
                    id: id.to_string(),
                    expected: position,
                    actual: block.order_index,
                });
            }
            let exercises = self.entry_ids(*id).len();
            let fits = match block.block_type {
                BlockType::Individual => exercises == 1,
                BlockType::Superset | BlockType::Circuit => exercises >= 2,
            };
            if !fits {
                return Err(ConsistencyError::BlockType {
                    block: *id,
                    block_type: block.block_type,
                    exercises,
                });
            }
        }
        Ok(())
    }

    fn check_entries(&self) -> Result<HashSet<EntryId>, ConsistencyError> {
        let mut seen = HashSet::new();
        for block_id in &self.block_order {
            for (position, id) in self.entry_ids(*block_id).iter().enumerate() {
                let entry = self
                    .entries
                    .get(id)
                    .ok_or_else(|| ConsistencyError::DanglingIndex {
                        kind: "entry",
                        id: id.to_string(),
                    })?;
                if entry.block_id != *block_id || !seen.insert(*id) {
                    return Err(ConsistencyError::WrongParent {
                        kind: "entry",
                        id: id.to_string(),
                    });
                }
                if entry.order_index != position {
                    return Err(ConsistencyError::OrderIndex {
                        kind: "entry",
                        id: id.to_string(),
                        expected: position,
                        actual: entry.order_index,
                    });
                }
            }
        }
        if self.entry_sets.len() != seen.len() {
            return Err(ConsistencyError::DanglingIndex {
                kind: "entry set list",
                id: format!("{} lists for {} entries", self.entry_sets.len(), seen.len()),
            });
        }
        Ok(seen)
    }

    fn check_sets(&self, entries: &HashSet<EntryId>) -> Result<HashSet<SetId>, ConsistencyError> {
        let mut seen = HashSet::new();
        for entry_id in entries {
            for (position, id) in self.set_ids(*entry_id).iter().enumerate() {
                let set = self
                    .sets
                    .get(id)
                    .ok_or_else(|| ConsistencyError::DanglingIndex {
                        kind: "set",
                        id: id.to_string(),
                    })?;
                if set.entry_id != *entry_id || !seen.insert(*id) {
                    return Err(ConsistencyError::WrongParent {
                        kind: "set",
                        id: id.to_string(),
                    });
                }
                if set.order_index != position {
                    return Err(ConsistencyError::OrderIndex {
                        kind: "set",
                        id: id.to_string(),
                        expected: position,
                        actual: set.order_index,
                    });
                }
            }
        }
        Ok(seen)
    }

    fn check_personal_records(&self) -> Result<(), ConsistencyError> {
        for exercise in self.exercise_definition_ids() {
            let flagged = self
                .sets_of_definition(&exercise)
                .into_iter()
                .filter(|id| self.sets.get(id).is_some_and(|set| set.personal_record))
                .count();
            if flagged > 1 {
                return Err(ConsistencyError::DuplicatePersonalRecord {
                    exercise,
                    count: flagged,
                });
            }
        }
        for (exercise, best) in &self.session_bests {
            let Some(set) = self.sets.get(&best.set_id) else {
                return Err(ConsistencyError::SessionBest {
                    exercise: exercise.clone(),
                    reason: "set does not exist",
                });
            };
            if !set.completed {
                return Err(ConsistencyError::SessionBest {
                    exercise: exercise.clone(),
                    reason: "set is not completed",
                });
            }
            if !set.personal_record {
                return Err(ConsistencyError::SessionBest {
                    exercise: exercise.clone(),
                    reason: "set is not flagged",
                });
            }
            if self.definition_of_set(best.set_id) != Some(exercise) {
                return Err(ConsistencyError::SessionBest {
                    exercise: exercise.clone(),
                    reason: "set belongs to another exercise",
                });
            }
        }
        Ok(())
    }
}
