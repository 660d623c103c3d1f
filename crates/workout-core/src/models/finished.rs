// ABOUTME: Finished-session payload handed to the persistence collaborator on commit
// ABOUTME: Nested blocks, exercises, sets, session totals, and personal-record rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::measurement::MeasurementTemplate;
use super::workout::{BlockType, SetType, ValueRange};
use crate::ids::{ExerciseDefinitionId, RoutineId};

/// Aggregates of a session, provisional while the workout runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionTotals {
    /// Sets currently in the session
    pub planned_sets: usize,
    /// Sets marked complete
    pub completed_sets: usize,
    /// Sum of weight x reps over completed `weight_reps` sets
    pub total_volume: f64,
    /// Mean RPE over completed sets that recorded one
    pub average_rpe: Option<f64>,
}

/// A workout ready to be persisted
///
/// Temporary ids are not part of the payload; persisted ids are assigned by the
/// collaborator when it stores the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishedSession {
    /// Owning user
    pub user_id: Uuid,
    /// Routine the session was started from
    pub routine_id: RoutineId,
    /// Routine name at start time
    pub routine_name: String,
    /// Start timestamp
    pub started_at: DateTime<Utc>,
    /// Finish timestamp
    pub finished_at: DateTime<Utc>,
    /// Whether the routine had been performed before this session
    pub previously_performed: bool,
    /// Whether the structure diverged from the routine during the workout
    pub structure_changed: bool,
    /// Session aggregates
    pub totals: SessionTotals,
    /// Blocks in display order
    pub blocks: Vec<FinishedBlock>,
    /// Personal records set in this session
    pub personal_records: Vec<PersonalRecordUpdate>,
}

/// Block of a finished session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishedBlock {
    /// Block type
    pub block_type: BlockType,
    /// Display name
    pub name: Option<String>,
    /// Position in the session
    pub order_index: usize,
    /// Rest between sets (seconds)
    pub rest_between_sets_secs: u32,
    /// Rest between exercises (seconds)
    pub rest_between_exercises_secs: u32,
    /// Added during the workout
    pub added_during_workout: bool,
    /// Modified during the workout
    pub modified_during_workout: bool,
    /// Exercises in block order
    pub exercises: Vec<FinishedExercise>,
}

/// Exercise of a finished session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishedExercise {
    /// Exercise definition
    pub exercise_id: ExerciseDefinitionId,
    /// Display name at the time of the workout
    pub name: String,
    /// Position in the block
    pub order_index: usize,
    /// 1-based position in the order exercises were actually started, if started at all
    pub execution_order: Option<usize>,
    /// Time the first set was completed
    pub first_completed_at: Option<DateTime<Utc>>,
    /// Notes
    pub notes: Option<String>,
    /// Sets in order
    pub sets: Vec<FinishedSet>,
}

/// Set of a finished session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishedSet {
    /// Position in the exercise
    pub order_index: usize,
    /// Measurement template
    pub template: MeasurementTemplate,
    /// Set type
    pub set_type: SetType,
    /// Planned primary value
    pub planned_primary: Option<f64>,
    /// Planned primary range
    pub planned_primary_range: Option<ValueRange>,
    /// Planned secondary value
    pub planned_secondary: Option<f64>,
    /// Planned secondary range
    pub planned_secondary_range: Option<ValueRange>,
    /// Planned RPE
    pub planned_rpe: Option<f64>,
    /// Actual primary value
    pub actual_primary: Option<f64>,
    /// Actual secondary value
    pub actual_secondary: Option<f64>,
    /// Actual RPE
    pub actual_rpe: Option<f64>,
    /// Completion flag
    pub completed: bool,
    /// Completion time
    pub completed_at: Option<DateTime<Utc>>,
    /// Whether the set is a personal record
    pub personal_record: bool,
}

/// Personal record row to persist for an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecordUpdate {
    /// Exercise definition
    pub exercise_id: ExerciseDefinitionId,
    /// Template the score was computed with
    pub template: MeasurementTemplate,
    /// Primary value
    pub primary_value: Option<f64>,
    /// Secondary value
    pub secondary_value: Option<f64>,
    /// Template-specific score
    pub score: f64,
    /// When the record was achieved
    pub achieved_at: DateTime<Utc>,
}
