// ABOUTME: Personal-record scoring engine for the Pierre active-workout runtime
// ABOUTME: Extracted from the runtime crate so scoring rules evolve independently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Workout Intelligence
//!
//! Scores completed sets so that the runtime can compare them against each other and
//! against the athlete's persisted personal records. Scoring is template-specific and
//! pluggable: each `MeasurementTemplate` maps to a `ScoringStrategy` in a
//! `PrScoringRegistry`.

/// Estimation algorithms used by scoring strategies
pub mod algorithms;

/// Per-template scoring strategies and the registry that dispatches to them
pub mod scoring;

pub use algorithms::one_rep_max::OneRepMaxAlgorithm;
pub use scoring::{PrScoringRegistry, ScoringStrategy};
