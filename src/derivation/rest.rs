// ABOUTME: Rest policy deciding whether a completed set starts a rest timer and for how long
// ABOUTME: Pure function over a RestContext describing the set's position in its block
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::graph::{RestDecision, RestKind, WorkoutGraph};
use crate::models::{BlockType, SetId, SetType};

/// Position of a just-completed set within its block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestContext {
    /// Type of the owning block
    pub block_type: BlockType,
    /// Block rest between sets (seconds)
    pub rest_between_sets_secs: u32,
    /// Block rest between exercises (seconds)
    pub rest_between_exercises_secs: u32,
    /// Set belongs to the last exercise of the block
    ///
    /// Positional: a later exercise with no set in the current round still counts.
    pub is_last_exercise: bool,
    /// Every exercise has completed its set at this position
    pub round_complete: bool,
    /// This position is the last round of the block
    pub is_final_round: bool,
    /// Type of the next set of the same exercise, if any
    pub next_set_type: Option<SetType>,
}

impl RestContext {
    /// Rest to start after the set, or `None` when the next set follows immediately
    #[must_use]
    pub fn rest_after_set(&self) -> Option<RestDecision> {
        match self.block_type {
            BlockType::Individual => {
                if self.next_set_type.is_some_and(SetType::starts_immediately) {
                    return None;
                }
                between_sets(self.rest_between_sets_secs)
            }
            BlockType::Superset => {
                if self.is_last_exercise {
                    between_sets(self.rest_between_sets_secs)
                } else {
                    None
                }
            }
            BlockType::Circuit => {
                if self.is_last_exercise && self.is_final_round {
                    return None;
                }
                if self.round_complete {
                    if self.is_final_round {
                        None
                    } else {
                        between_sets(self.rest_between_sets_secs)
                    }
                } else if self.rest_between_exercises_secs > 0 {
                    Some(RestDecision {
                        kind: RestKind::BetweenExercises,
                        duration_secs: self.rest_between_exercises_secs,
                    })
                } else {
                    None
                }
            }
        }
    }
}

const fn between_sets(secs: u32) -> Option<RestDecision> {
    if secs > 0 {
        Some(RestDecision {
            kind: RestKind::BetweenSets,
            duration_secs: secs,
        })
    } else {
        None
    }
}

impl WorkoutGraph {
    /// Describe where `set_id` sits in its block, as of the current completion state
    #[must_use]
    pub fn rest_context(&self, set_id: SetId) -> Option<RestContext> {
        let set = self.sets.get(&set_id)?;
        let entry = self.entries.get(&set.entry_id)?;
        let block = self.blocks.get(&entry.block_id)?;
        let entry_ids = self.entry_ids(block.id);
        let round = set.order_index;

        let rounds = entry_ids
            .iter()
            .map(|id| self.set_ids(*id).len())
            .max()
            .unwrap_or(0);
        let round_complete = entry_ids.iter().all(|id| {
            self.set_ids(*id)
                .get(round)
                .and_then(|set_id| self.sets.get(set_id))
                .is_some_and(|set| set.completed)
        });
        let next_set_type = self
            .set_ids(entry.id)
            .get(round + 1)
            .and_then(|id| self.sets.get(id))
            .map(|next| next.set_type);

        Some(RestContext {
            block_type: block.block_type,
            rest_between_sets_secs: block.rest_between_sets_secs,
            rest_between_exercises_secs: block.rest_between_exercises_secs,
            is_last_exercise: entry_ids.last() == Some(&entry.id),
            round_complete,
            is_final_round: round + 1 >= rounds,
            next_set_type,
        })
    }
}
