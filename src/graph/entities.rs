// ABOUTME: Entities of an active workout graph: session, block, exercise entry, set
// ABOUTME: Also holds the session-best personal record kept per exercise definition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    BlockId, BlockType, EntryId, ExerciseDefinition, MeasurementTemplate, PrSnapshot, RoutineId,
    SessionInstanceId, SessionTotals, SetId, SetType, ValueField, ValueRange,
};

/// The single active workout session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Identity of this session instance
    pub instance_id: SessionInstanceId,
    /// Owning user
    pub user_id: Uuid,
    /// Routine the session was started from
    pub routine_id: RoutineId,
    /// Routine name at start time
    pub routine_name: String,
    /// Start timestamp
    pub started_at: DateTime<Utc>,
    /// Provisional finish timestamp, set when the workout is being finished
    pub finished_at: Option<DateTime<Utc>>,
    /// Provisional aggregates
    pub totals: SessionTotals,
    /// Set count at start, baseline for change detection
    pub original_set_count: usize,
    /// Whether the routine had been performed before
    pub previously_performed: bool,
}

/// Ordered unit of a session grouping one or more exercises
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Temporary id
    pub id: BlockId,
    /// How the exercises of the block are executed
    pub block_type: BlockType,
    /// Optional display name
    pub name: Option<String>,
    /// Position in the session
    pub order_index: usize,
    /// Rest after a set (individual) or a round (superset/circuit), seconds
    pub rest_between_sets_secs: u32,
    /// Rest between circuit exercises, seconds
    pub rest_between_exercises_secs: u32,
    /// Created during the workout rather than taken from the routine
    pub added_during_workout: bool,
    /// Structure changed during the workout
    pub modified_during_workout: bool,
}

/// An exercise placed in a block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseEntry {
    /// Temporary id
    pub id: EntryId,
    /// Owning block
    pub block_id: BlockId,
    /// Denormalized exercise definition
    pub exercise: ExerciseDefinition,
    /// Position within the block
    pub order_index: usize,
    /// Completion time of the first set, used to reconstruct execution order
    pub first_completed_at: Option<DateTime<Utc>>,
    /// Notes
    pub notes: Option<String>,
    /// Persisted all-time record for this exercise, if any
    pub current_pr: Option<PrSnapshot>,
    /// Added during the workout
    pub added_during_workout: bool,
    /// Exercise definition was swapped during the workout
    pub replaced: bool,
}

/// A set of an exercise entry, split into planned and actual halves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Temporary id
    pub id: SetId,
    /// Owning entry
    pub entry_id: EntryId,
    /// Position within the entry, contiguous from 0
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
    /// Planned tempo
    pub tempo: Option<String>,
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
    /// Holds the session-best record of its exercise
    pub personal_record: bool,
    /// Edited during the workout
    pub modified: bool,
}

impl WorkoutSet {
    /// Empty set using `template`
    #[must_use]
    pub fn blank(
        id: SetId,
        entry_id: EntryId,
        order_index: usize,
        template: MeasurementTemplate,
    ) -> Self {
        Self {
            id,
            entry_id,
            order_index,
            template,
            set_type: SetType::Normal,
            planned_primary: None,
            planned_primary_range: None,
            planned_secondary: None,
            planned_secondary_range: None,
            planned_rpe: None,
            tempo: None,
            actual_primary: None,
            actual_secondary: None,
            actual_rpe: None,
            completed: false,
            completed_at: None,
            personal_record: false,
            modified: false,
        }
    }

    /// Actual value recorded in `field`
    #[must_use]
    pub const fn value(&self, field: ValueField) -> Option<f64> {
        match field {
            ValueField::Primary => self.actual_primary,
            ValueField::Secondary => self.actual_secondary,
        }
    }

    /// Overwrite the actual value of `field`
    pub fn set_value(&mut self, field: ValueField, value: Option<f64>) {
        match field {
            ValueField::Primary => self.actual_primary = value,
            ValueField::Secondary => self.actual_secondary = value,
        }
    }

    /// Planned value of `field`
    #[must_use]
    pub const fn planned(&self, field: ValueField) -> Option<f64> {
        match field {
            ValueField::Primary => self.planned_primary,
            ValueField::Secondary => self.planned_secondary,
        }
    }

    /// Planned range of `field`
    #[must_use]
    pub const fn planned_range(&self, field: ValueField) -> Option<ValueRange> {
        match field {
            ValueField::Primary => self.planned_primary_range,
            ValueField::Secondary => self.planned_secondary_range,
        }
    }
}

/// Best completed set of an exercise definition within this session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionBest {
    /// Set holding the record
    pub set_id: SetId,
    /// Template the score was computed with
    pub template: MeasurementTemplate,
    /// Primary value of the set
    pub primary_value: Option<f64>,
    /// Secondary value of the set
    pub secondary_value: Option<f64>,
    /// Template-specific score
    pub score: f64,
    /// When the record was taken
    pub created_at: DateTime<Utc>,
}
