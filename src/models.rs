// ABOUTME: Core data models re-exported from pierre-workout-core
// ABOUTME: Identifiers, routine snapshots, measurement templates, and history types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models shared with the persistence collaborator

pub use pierre_workout_core::ids::{
    BlockId, EntryId, ExerciseDefinitionId, RoutineId, SessionInstanceId, SetId,
    TempIdAllocator,
};
pub use pierre_workout_core::models::*;
