// ABOUTME: Unified error handling re-exported from pierre-workout-core
// ABOUTME: AppError, ErrorCode, and AppResult used across the runtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unified error handling system

pub use pierre_workout_core::errors::{AppError, AppResult, ErrorCode};
