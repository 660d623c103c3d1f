// ABOUTME: Main library entry point for the Pierre active-workout runtime
// ABOUTME: In-memory session graph with rest timers, circuit walks, auto-fill, and PR tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Workout
//!
//! Runtime state model for a strength or conditioning workout while it is being
//! performed. A persisted routine is copied into a [`graph::WorkoutGraph`] of blocks,
//! exercise entries, and sets addressed by temporary ids. Every mutation keeps the graph
//! structurally consistent and re-derives what depends on it: block types, order
//! indices, session totals, session-best personal records, and the rest timer.
//!
//! ## Architecture
//!
//! - **Graph**: arena of blocks, entries, and sets with ordered child-id lists
//! - **Builder**: routine snapshot to graph, dropping orphaned rows
//! - **Mutations**: block, exercise, and set operations; stale ids are no-ops
//! - **Derivation**: rest policy, round-robin circuit walk, circuit timer plan
//! - **PR tracking**: per-template scoring and a single session best per exercise
//! - **Repository**: async persistence collaborator with an in-memory implementation
//! - **Runtime**: owner of the single active workout and its repository round-trips
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use chrono::Utc;
//! use pierre_workout::config::WorkoutConfig;
//! use pierre_workout::errors::AppResult;
//! use pierre_workout::models::RoutineId;
//! use pierre_workout::repository::InMemoryWorkoutRepository;
//! use pierre_workout::runtime::WorkoutRuntime;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let repository = Arc::new(InMemoryWorkoutRepository::new());
//!     let mut runtime = WorkoutRuntime::new(repository, Uuid::new_v4(), WorkoutConfig::from_env()?);
//!
//!     let graph = runtime.start_from_routine(&RoutineId::new("push-day"), Utc::now()).await?;
//!     println!("Workout has {} sets", graph.set_count());
//!
//!     runtime.finish(Utc::now()).await?;
//!     Ok(())
//! }
//! ```

/// Set value edits with auto-fill propagation
pub mod autofill;

/// Routine snapshot to workout graph construction
pub mod builder;

/// Environment-driven runtime settings
pub mod config;

/// Workout constants
pub mod constants;

/// Rest policy, circuit walk, and circuit timer derivations
pub mod derivation;

/// Unified error handling
pub mod errors;

/// Active workout graph: entities, cursor, rest timer, consistency check
pub mod graph;

/// Previous-performance and personal-record loading
pub mod history;

/// Structured logging setup
pub mod logging;

/// Data models shared with the persistence collaborator
pub mod models;

/// Block, exercise, and set mutations
pub mod mutations;

/// Session-best personal record tracking
pub mod pr_tracker;

/// Scripted command replay
pub mod replay;

/// Persistence collaborator abstraction
pub mod repository;

/// Owner of the active workout
pub mod runtime;

pub use builder::GraphBuilder;
pub use graph::WorkoutGraph;
pub use runtime::WorkoutRuntime;
