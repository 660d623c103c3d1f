// ABOUTME: Core data models for the active-workout runtime
// ABOUTME: Re-exports measurement, block/set, routine, history, and finished-session types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Value types shared between the runtime and the persistence collaborator.
//!
//! - `RoutineSnapshot`: flat routine rows the session graph is built from
//! - `ExerciseDefinition`: denormalized exercise metadata
//! - `PreviousSet`, `PrSnapshot`: read-only history consulted during the workout
//! - `FinishedSession`: payload committed when the workout ends

mod finished;
mod history;
mod measurement;
mod routine;
mod workout;

pub use finished::{
    FinishedBlock, FinishedExercise, FinishedSession, FinishedSet, PersonalRecordUpdate,
    SessionTotals,
};
pub use history::{PrSnapshot, PreviousSet};
pub use measurement::{MeasurementTemplate, MeasurementType, ValueField};
pub use routine::{ExerciseDefinition, RoutineBlock, RoutineExercise, RoutineSet, RoutineSnapshot};
pub use workout::{BlockType, SetType, ValueRange};
