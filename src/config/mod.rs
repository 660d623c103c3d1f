// ABOUTME: Configuration module for the workout runtime
// ABOUTME: Re-exports workout settings and configuration errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-driven configuration

/// Configuration error types
pub mod error;

/// Workout runtime settings
pub mod workout;

pub use error::ConfigError;
pub use workout::WorkoutConfig;
