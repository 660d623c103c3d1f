// ABOUTME: Scripted replay of workout commands against the runtime
// ABOUTME: Commands address blocks, exercises, and sets by display position
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Command Replay
//!
//! A replay script is a JSON array of [`ReplayCommand`] values. Temporary ids are not
//! stable across runs, so commands point at blocks, exercises, and sets by their current
//! display position. A position that does not resolve makes the command a no-op, the
//! same as a stale id in the interactive API.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::graph::{RestKind, WorkoutGraph};
use crate::models::{
    BlockId, EntryId, ExerciseDefinition, FinishedSession, SetId, SetType, ValueField,
};
use crate::mutations::{NewBlockKind, SetCompletion};
use crate::runtime::WorkoutRuntime;

/// Simulated time between two replayed commands
pub const REPLAY_STEP_SECS: i64 = 45;

/// One scripted command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReplayCommand {
    /// Add blocks holding new exercises
    AddBlock {
        /// Block kind
        kind: NewBlockKind,
        /// Exercises to add
        exercises: Vec<ExerciseDefinition>,
    },
    /// Append exercises to a block
    AddExercises {
        /// Block position
        block: usize,
        /// Exercises to add
        exercises: Vec<ExerciseDefinition>,
    },
    /// Delete a block
    DeleteBlock {
        /// Block position
        block: usize,
    },
    /// Split a multi-exercise block
    ConvertToIndividual {
        /// Block position
        block: usize,
    },
    /// Move blocks; `order` lists current positions in their new order
    ReorderBlocks {
        /// Current positions in the new order
        order: Vec<usize>,
    },
    /// Swap an exercise definition
    ReplaceExercise {
        /// Block position
        block: usize,
        /// Exercise position
        exercise: usize,
        /// New definition
        with: ExerciseDefinition,
    },
    /// Delete an exercise
    DeleteExercise {
        /// Block position
        block: usize,
        /// Exercise position
        exercise: usize,
    },
    /// Replace exercise notes
    UpdateNotes {
        /// Block position
        block: usize,
        /// Exercise position
        exercise: usize,
        /// New notes
        notes: Option<String>,
    },
    /// Append a set
    AddSet {
        /// Block position
        block: usize,
        /// Exercise position
        exercise: usize,
    },
    /// Delete a set
    DeleteSet {
        /// Block position
        block: usize,
        /// Exercise position
        exercise: usize,
        /// Set position
        set: usize,
    },
    /// Edit an actual value
    UpdateValue {
        /// Block position
        block: usize,
        /// Exercise position
        exercise: usize,
        /// Set position
        set: usize,
        /// Value slot
        field: ValueField,
        /// New value
        value: Option<f64>,
    },
    /// Edit the recorded RPE
    UpdateRpe {
        /// Block position
        block: usize,
        /// Exercise position
        exercise: usize,
        /// Set position
        set: usize,
        /// New RPE
        rpe: Option<f64>,
    },
    /// Change a set type
    UpdateSetType {
        /// Block position
        block: usize,
        /// Exercise position
        exercise: usize,
        /// Set position
        set: usize,
        /// New type
        set_type: SetType,
    },
    /// Complete a set
    Complete {
        /// Block position
        block: usize,
        /// Exercise position
        exercise: usize,
        /// Set position
        set: usize,
        /// Submitted values
        #[serde(default, flatten)]
        values: SetCompletion,
    },
    /// Reverse a completion
    Uncomplete {
        /// Block position
        block: usize,
        /// Exercise position
        exercise: usize,
        /// Set position
        set: usize,
    },
    /// Change a block rest duration
    UpdateRest {
        /// Block position
        block: usize,
        /// Rest period
        kind: RestKind,
        /// Seconds
        secs: u32,
    },
    /// Stop the rest timer
    SkipRest,
    /// Add or remove seconds from the rest timer
    AdjustRest {
        /// Seconds to add; negative removes
        delta_secs: i64,
    },
}

impl ReplayCommand {
    /// Snake-case operation name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddBlock { .. } => "add_block",
            Self::AddExercises { .. } => "add_exercises",
            Self::DeleteBlock { .. } => "delete_block",
            Self::ConvertToIndividual { .. } => "convert_to_individual",
            Self::ReorderBlocks { .. } => "reorder_blocks",
            Self::ReplaceExercise { .. } => "replace_exercise",
            Self::DeleteExercise { .. } => "delete_exercise",
            Self::UpdateNotes { .. } => "update_notes",
            Self::AddSet { .. } => "add_set",
            Self::DeleteSet { .. } => "delete_set",
            Self::UpdateValue { .. } => "update_value",
            Self::UpdateRpe { .. } => "update_rpe",
            Self::UpdateSetType { .. } => "update_set_type",
            Self::Complete { .. } => "complete",
            Self::Uncomplete { .. } => "uncomplete",
            Self::UpdateRest { .. } => "update_rest",
            Self::SkipRest => "skip_rest",
            Self::AdjustRest { .. } => "adjust_rest",
        }
    }
}

/// Result of one replayed command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayStep {
    /// Position in the script
    pub index: usize,
    /// Operation name
    pub op: String,
    /// Whether the command changed the workout
    pub applied: bool,
    /// Rest started by a completion, seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_secs: Option<u32>,
}

/// Outcome of a whole replay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    /// Per-command results
    pub steps: Vec<ReplayStep>,
    /// Session as it would be committed
    pub session: FinishedSession,
}

/// Read a JSON document such as a routine snapshot or a command script
///
/// # Errors
///
/// Returns `InvalidInput` if the file cannot be read and `SerializationError` if it
/// does not parse
pub fn load_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::invalid_input(format!("Failed to read {}", path.display())).with_source(e)
    })?;
    Ok(serde_json::from_str(&raw)?)
}

fn block_at(graph: &WorkoutGraph, block: usize) -> Option<BlockId> {
    graph.block_order().get(block).copied()
}

fn entry_at(graph: &WorkoutGraph, block: usize, exercise: usize) -> Option<EntryId> {
    let block_id = block_at(graph, block)?;
    graph.entry_ids(block_id).get(exercise).copied()
}

fn set_at(graph: &WorkoutGraph, block: usize, exercise: usize, set: usize) -> Option<SetId> {
    let entry_id = entry_at(graph, block, exercise)?;
    graph.set_ids(entry_id).get(set).copied()
}

/// Replay `commands` against the active workout, one step every [`REPLAY_STEP_SECS`]
///
/// # Errors
///
/// Returns `InvalidState` if no workout is active
pub async fn replay(
    runtime: &mut WorkoutRuntime,
    commands: &[ReplayCommand],
    start: DateTime<Utc>,
) -> AppResult<ReplayReport> {
    let mut steps = Vec::with_capacity(commands.len());
    let mut now = start;

    for (index, command) in commands.iter().enumerate() {
        now += Duration::seconds(REPLAY_STEP_SECS);
        let graph = runtime
            .graph_mut()
            .ok_or_else(|| AppError::invalid_state("No active workout to replay against"))?;
        let (applied, rest_secs, history) = apply(graph, command.clone(), now);
        if let Some(task) = history {
            runtime.run_history_task(task).await;
        }
        debug!(index, op = command.name(), applied, "Replayed command");
        steps.push(ReplayStep {
            index,
            op: command.name().to_owned(),
            applied,
            rest_secs,
        });
    }

    let session = runtime
        .graph()
        .ok_or_else(|| AppError::invalid_state("No active workout to replay against"))?
        .to_finished_session(now);
    Ok(ReplayReport { steps, session })
}

fn apply(
    graph: &mut WorkoutGraph,
    command: ReplayCommand,
    now: DateTime<Utc>,
) -> (bool, Option<u32>, Option<crate::history::HistoryLoadTask>) {
    match command {
        ReplayCommand::AddBlock { kind, exercises } => match graph.add_blocks(kind, exercises) {
            Some(addition) => (true, None, Some(addition.history)),
            None => (false, None, None),
        },
        ReplayCommand::AddExercises { block, exercises } => {
            let task = block_at(graph, block)
                .and_then(|block_id| graph.add_exercises_to_block(block_id, exercises));
            (task.is_some(), None, task)
        }
        ReplayCommand::DeleteBlock { block } => {
            let applied = block_at(graph, block).is_some_and(|id| graph.delete_block(id));
            (applied, None, None)
        }
        ReplayCommand::ConvertToIndividual { block } => {
            let applied = block_at(graph, block)
                .and_then(|id| graph.convert_block_to_individual(id))
                .is_some();
            (applied, None, None)
        }
        ReplayCommand::ReorderBlocks { order } => {
            let ids: Option<Vec<BlockId>> =
                order.iter().map(|position| block_at(graph, *position)).collect();
            let applied = ids.is_some_and(|ids| graph.reorder_blocks(ids));
            (applied, None, None)
        }
        ReplayCommand::ReplaceExercise {
            block,
            exercise,
            with,
        } => {
            let task = entry_at(graph, block, exercise)
                .and_then(|entry_id| graph.replace_exercise(entry_id, with));
            (task.is_some(), None, task)
        }
        ReplayCommand::DeleteExercise { block, exercise } => {
            let applied =
                entry_at(graph, block, exercise).is_some_and(|id| graph.delete_exercise(id));
            (applied, None, None)
        }
        ReplayCommand::UpdateNotes {
            block,
            exercise,
            notes,
        } => {
            let applied = entry_at(graph, block, exercise)
                .is_some_and(|id| graph.update_entry_notes(id, notes));
            (applied, None, None)
        }
        ReplayCommand::AddSet { block, exercise } => {
            let applied = entry_at(graph, block, exercise)
                .and_then(|id| graph.add_set(id))
                .is_some();
            (applied, None, None)
        }
        ReplayCommand::DeleteSet {
            block,
            exercise,
            set,
        } => {
            let applied = set_at(graph, block, exercise, set).is_some_and(|id| graph.delete_set(id));
            (applied, None, None)
        }
        ReplayCommand::UpdateValue {
            block,
            exercise,
            set,
            field,
            value,
        } => {
            let applied = set_at(graph, block, exercise, set)
                .and_then(|id| graph.update_set_value(id, field, value))
                .is_some();
            (applied, None, None)
        }
        ReplayCommand::UpdateRpe {
            block,
            exercise,
            set,
            rpe,
        } => {
            let applied =
                set_at(graph, block, exercise, set).is_some_and(|id| graph.update_set_rpe(id, rpe));
            (applied, None, None)
        }
        ReplayCommand::UpdateSetType {
            block,
            exercise,
            set,
            set_type,
        } => {
            let applied = set_at(graph, block, exercise, set)
                .is_some_and(|id| graph.update_set_type(id, set_type));
            (applied, None, None)
        }
        ReplayCommand::Complete {
            block,
            exercise,
            set,
            values,
        } => match set_at(graph, block, exercise, set)
            .and_then(|id| graph.complete_set(id, values, now))
        {
            Some(outcome) => (true, outcome.rest.map(|rest| rest.duration_secs), None),
            None => (false, None, None),
        },
        ReplayCommand::Uncomplete {
            block,
            exercise,
            set,
        } => {
            let applied =
                set_at(graph, block, exercise, set).is_some_and(|id| graph.uncomplete_set(id));
            (applied, None, None)
        }
        ReplayCommand::UpdateRest { block, kind, secs } => {
            let applied =
                block_at(graph, block).is_some_and(|id| graph.update_block_rest(id, kind, secs));
            (applied, None, None)
        }
        ReplayCommand::SkipRest => (graph.skip_rest_timer(), None, None),
        ReplayCommand::AdjustRest { delta_secs } => {
            (graph.adjust_rest_timer(delta_secs, now), None, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_parse_from_json() {
        let json = r#"[
            {"op": "add_block", "kind": "superset", "exercises": [
                {"id": "squat", "name": "Squat", "default_template": "weight_reps"}
            ]},
            {"op": "complete", "block": 0, "exercise": 0, "set": 0, "primary": 100.0, "secondary": 5.0},
            {"op": "update_value", "block": 0, "exercise": 0, "set": 1, "field": "primary", "value": 105.0},
            {"op": "skip_rest"}
        ]"#;
        let commands: Vec<ReplayCommand> = serde_json::from_str(json).unwrap();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[1].name(), "complete");
        let ReplayCommand::Complete { values, .. } = &commands[1] else {
            unreachable!("second command is a completion");
        };
        assert_eq!(values.primary, Some(100.0));
        assert_eq!(values.personal_record, None);
    }
}
