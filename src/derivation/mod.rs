// ABOUTME: Derivation algorithms computed from the workout graph without mutating it
// ABOUTME: Rest policy, multi-exercise round walk, and circuit timer planning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Timed circuit playback plan
pub mod circuit_timer;

/// Round-major next-set walk
pub mod circuit_walk;

/// Rest timer policy
pub mod rest;

pub use circuit_timer::{CircuitSlot, CircuitTimerExercise, CircuitTimerItem, CircuitTimerPlan};
pub use circuit_walk::{walk_rounds, BlockProgress, ExerciseColumn, NextSetInfo, NextSetTarget};
pub use rest::RestContext;
