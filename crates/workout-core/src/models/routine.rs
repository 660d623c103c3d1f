// ABOUTME: Routine snapshot and exercise definition models loaded from persistence
// ABOUTME: Flat block/exercise/set rows linked by persisted foreign keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::measurement::MeasurementTemplate;
use super::workout::{BlockType, SetType, ValueRange};
use crate::constants::id_prefixes;
use crate::ids::{ExerciseDefinitionId, RoutineId};

/// Exercise definition as known at the time it was added to the workout
///
/// Entries keep a denormalized copy so the workout can be displayed without another
/// lookup, even if the definition is edited elsewhere while the session is running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    /// Persisted definition id
    pub id: ExerciseDefinitionId,
    /// Display name
    pub name: String,
    /// Template used for sets created for this exercise
    pub default_template: MeasurementTemplate,
    /// Primary muscle group, if categorized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_muscle: Option<String>,
    /// Required equipment, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
}

impl ExerciseDefinition {
    /// Definition with only the required fields
    #[must_use]
    pub fn new(
        id: impl Into<ExerciseDefinitionId>,
        name: impl Into<String>,
        default_template: MeasurementTemplate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            default_template,
            primary_muscle: None,
            equipment: None,
        }
    }
}

/// Routine as fetched from persistence
///
/// Rows are flat and reference their parents by persisted id. Nothing guarantees the
/// rows are consistent; the graph builder drops children whose parent is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineSnapshot {
    /// Persisted routine id
    pub id: RoutineId,
    /// Routine name
    pub name: String,
    /// Block rows
    #[serde(default)]
    pub blocks: Vec<RoutineBlock>,
    /// Exercise rows
    #[serde(default)]
    pub exercises: Vec<RoutineExercise>,
    /// Set rows
    #[serde(default)]
    pub sets: Vec<RoutineSet>,
}

impl RoutineSnapshot {
    /// Placeholder routine for a quick start with no plan
    #[must_use]
    pub fn quick_start(name: impl Into<String>) -> Self {
        Self {
            id: RoutineId::new(format!(
                "{}-{}",
                id_prefixes::QUICK_START_ROUTINE,
                Uuid::new_v4()
            )),
            name: name.into(),
            blocks: Vec::new(),
            exercises: Vec::new(),
            sets: Vec::new(),
        }
    }

    /// Distinct exercise definitions referenced by the routine, in first-seen order
    #[must_use]
    pub fn exercise_definition_ids(&self) -> Vec<ExerciseDefinitionId> {
        let mut ids: Vec<ExerciseDefinitionId> = Vec::new();
        for row in &self.exercises {
            if !ids.contains(&row.exercise.id) {
                ids.push(row.exercise.id.clone());
            }
        }
        ids
    }
}

/// Block row of a routine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineBlock {
    /// Persisted block id
    pub id: String,
    /// Block type
    pub block_type: BlockType,
    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,
    /// Position among the routine's blocks
    pub order_index: u32,
    /// Rest after a set (individual), a round (superset/circuit) in seconds
    #[serde(default)]
    pub rest_between_sets_secs: u32,
    /// Rest between exercises of a circuit in seconds
    #[serde(default)]
    pub rest_between_exercises_secs: u32,
}

/// Exercise row of a routine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineExercise {
    /// Persisted row id
    pub id: String,
    /// Parent block row id
    pub block_id: String,
    /// Exercise definition snapshot
    pub exercise: ExerciseDefinition,
    /// Position within the parent block
    pub order_index: u32,
    /// Notes written when the routine was authored
    #[serde(default)]
    pub notes: Option<String>,
}

/// Set row of a routine (planned values only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineSet {
    /// Persisted row id
    pub id: String,
    /// Parent exercise row id
    pub routine_exercise_id: String,
    /// Position within the parent exercise
    pub order_index: u32,
    /// Measurement template
    pub template: MeasurementTemplate,
    /// Set type
    #[serde(default)]
    pub set_type: SetType,
    /// Planned primary value
    #[serde(default)]
    pub planned_primary: Option<f64>,
    /// Planned primary range
    #[serde(default)]
    pub planned_primary_range: Option<ValueRange>,
    /// Planned secondary value
    #[serde(default)]
    pub planned_secondary: Option<f64>,
    /// Planned secondary range
    #[serde(default)]
    pub planned_secondary_range: Option<ValueRange>,
    /// Planned RPE (1-10)
    #[serde(default)]
    pub planned_rpe: Option<f64>,
    /// Planned tempo notation (e.g. "3-1-1-0")
    #[serde(default)]
    pub tempo: Option<String>,
}
