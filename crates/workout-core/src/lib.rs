// ABOUTME: Core types and constants for the Pierre active-workout runtime
// ABOUTME: Foundation crate with identifiers, domain models, error handling, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Workout Core
//!
//! Foundation crate providing shared types for the active-workout runtime. It holds
//! everything that is exchanged with the persistence collaborator (routine snapshots,
//! previous-set history, PR snapshots, finished-session payloads) and the value types
//! the in-memory graph is built from.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Workout defaults (sets per exercise, rest durations, history depth)
//! - **ids**: Session-local temporary identifiers and persisted identifiers
//! - **models**: Blocks, sets, measurement templates, routine snapshots, history

/// Unified error handling system with standard error codes
pub mod errors;

/// Workout defaults organized by domain
pub mod constants;

/// Temporary (session-local) and persisted identifiers
pub mod ids;

/// Core workout data models
pub mod models;
