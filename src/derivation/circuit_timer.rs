// ABOUTME: Circuit timer planner for circuits made entirely of timed sets
// ABOUTME: Builds per-round targets and yields the next item in round-major order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::graph::WorkoutGraph;
use crate::models::{BlockId, BlockType, EntryId, MeasurementTemplate, SetId};

/// One set slot of a timed exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitSlot {
    /// Set performed in this round
    pub set_id: SetId,
    /// Work duration (seconds)
    pub target_secs: u32,
}

/// A timed exercise and its slots, indexed by round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitTimerExercise {
    /// Exercise entry
    pub entry_id: EntryId,
    /// Display name
    pub name: String,
    /// Slot per round; shorter than `total_rounds` when the exercise has fewer sets
    pub slots: Vec<CircuitSlot>,
}

/// Next item the circuit timer should run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitTimerItem {
    /// Set to perform
    pub set_id: SetId,
    /// Exercise entry
    pub entry_id: EntryId,
    /// Round index
    pub round: usize,
    /// Position of the exercise in the block
    pub exercise_index: usize,
    /// Work duration (seconds)
    pub target_secs: u32,
    /// No later exercise has a slot in this round
    pub is_last_exercise_in_round: bool,
    /// This is the last round
    pub is_last_round: bool,
}

/// Playback plan of a timed circuit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitTimerPlan {
    /// Circuit block
    pub block_id: BlockId,
    /// Rounds in the circuit
    pub total_rounds: usize,
    /// Exercises in block order
    pub exercises: Vec<CircuitTimerExercise>,
    /// Sets already completed
    pub completed_set_ids: HashSet<SetId>,
}

impl CircuitTimerPlan {
    /// First incomplete slot in round-major, exercise-minor order
    #[must_use]
    pub fn next_item(&self) -> Option<CircuitTimerItem> {
        for round in 0..self.total_rounds {
            let last_in_round = self
                .exercises
                .iter()
                .rposition(|exercise| exercise.slots.len() > round)?;
            for (exercise_index, exercise) in self.exercises.iter().enumerate() {
                let Some(slot) = exercise.slots.get(round) else {
                    continue;
                };
                if self.completed_set_ids.contains(&slot.set_id) {
                    continue;
                }
                return Some(CircuitTimerItem {
                    set_id: slot.set_id,
                    entry_id: exercise.entry_id,
                    round,
                    exercise_index,
                    target_secs: slot.target_secs,
                    is_last_exercise_in_round: exercise_index == last_in_round,
                    is_last_round: round + 1 == self.total_rounds,
                });
            }
        }
        None
    }

    /// Whether every slot has been completed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.next_item().is_none()
    }
}

impl WorkoutGraph {
    /// Whether a block can be run with the circuit timer
    #[must_use]
    pub fn is_circuit_timer_eligible(&self, block_id: BlockId) -> bool {
        let Some(block) = self.blocks.get(&block_id) else {
            return false;
        };
        let entry_ids = self.entry_ids(block_id);
        block.block_type == BlockType::Circuit
            && !entry_ids.is_empty()
            && entry_ids.iter().all(|entry_id| {
                self.sets_for_entry(*entry_id)
                    .all(|set| set.template == MeasurementTemplate::Time)
            })
    }

    /// Timer plan of an eligible circuit
    #[must_use]
    pub fn circuit_timer_plan(&self, block_id: BlockId) -> Option<CircuitTimerPlan> {
        if !self.is_circuit_timer_eligible(block_id) {
            return None;
        }
        let default_secs = self.config.circuit_item_default_secs;
        let mut completed_set_ids = HashSet::new();
        let exercises: Vec<CircuitTimerExercise> = self
            .entries_in_block(block_id)
            .map(|entry| CircuitTimerExercise {
                entry_id: entry.id,
                name: entry.exercise.name.clone(),
                slots: self
                    .sets_for_entry(entry.id)
                    .map(|set| {
                        if set.completed {
                            completed_set_ids.insert(set.id);
                        }
                        CircuitSlot {
                            set_id: set.id,
                            target_secs: set
                                .planned_primary
                                .filter(|secs| secs.is_finite() && *secs > 0.0)
                                .map_or(default_secs, |secs| secs.round() as u32),
                        }
                    })
                    .collect(),
            })
            .collect();
        let total_rounds = exercises.iter().map(|e| e.slots.len()).max().unwrap_or(0);

        Some(CircuitTimerPlan {
            block_id,
            total_rounds,
            exercises,
            completed_set_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(slot_counts: &[usize], completed: &[u64]) -> CircuitTimerPlan {
        let exercises: Vec<CircuitTimerExercise> = slot_counts
            .iter()
            .enumerate()
            .map(|(i, count)| CircuitTimerExercise {
                entry_id: EntryId::from_raw(i as u64 + 1),
                name: format!("exercise {i}"),
                slots: (0..*count)
                    .map(|round| CircuitSlot {
                        set_id: SetId::from_raw((i as u64 + 1) * 10 + round as u64),
                        target_secs: 30,
                    })
                    .collect(),
            })
            .collect();
        CircuitTimerPlan {
            block_id: BlockId::from_raw(1),
            total_rounds: slot_counts.iter().copied().max().unwrap_or(0),
            exercises,
            completed_set_ids: completed.iter().map(|raw| SetId::from_raw(*raw)).collect(),
        }
    }

    #[test]
    fn test_round_major_exercise_minor() {
        let plan = plan(&[2, 2], &[10]);
        let item = plan.next_item().unwrap();
        assert_eq!(item.set_id, SetId::from_raw(20));
        assert_eq!(item.exercise_index, 1);
        assert!(item.is_last_exercise_in_round);
        assert!(!item.is_last_round);
    }

    #[test]
    fn test_last_exercise_in_round_skips_short_columns() {
        let plan = plan(&[2, 1], &[10, 20]);
        let item = plan.next_item().unwrap();
        assert_eq!(item.set_id, SetId::from_raw(11));
        assert_eq!(item.round, 1);
        assert!(item.is_last_exercise_in_round);
        assert!(item.is_last_round);
    }

    #[test]
    fn test_complete_plan_has_no_item() {
        let plan = plan(&[1, 1], &[10, 20]);
        assert!(plan.is_complete());
    }
}
