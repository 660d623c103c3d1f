// ABOUTME: Estimation algorithms module for personal-record scoring
// ABOUTME: Contains one-rep-max estimation formulas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Estimated one-rep-max formulas (Epley, Brzycki, Lombardi)
pub mod one_rep_max;
