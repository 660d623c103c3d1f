// ABOUTME: Workout constants re-exported from pierre-workout-core
// ABOUTME: Default set counts, rest durations, and history depth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application constants organized by domain

pub use pierre_workout_core::constants::*;
