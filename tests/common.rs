// ABOUTME: Shared test utilities and fixtures for workout runtime integration tests
// ABOUTME: Provides quiet logging, routine snapshots, graph builders, and consistency checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `pierre_workout`
//!
//! The `push_day` routine used across the integration tests has three blocks:
//! - individual bench press, 3 sets planned at 60 x 8, 90s rest
//! - superset of rows and curls, 2 sets each, 60s rest
//! - circuit of jumping jacks (2), mountain climbers (2), plank (1), 120s / 15s rest

use std::sync::Once;

use chrono::{DateTime, Duration, TimeZone, Utc};
use pierre_workout::config::WorkoutConfig;
use pierre_workout::graph::WorkoutGraph;
use pierre_workout::models::{
    BlockId, BlockType, EntryId, ExerciseDefinition, MeasurementTemplate, RoutineBlock,
    RoutineExercise, RoutineId, RoutineSet, RoutineSnapshot, SetId, SetType,
};
use pierre_workout::mutations::{CompletionOutcome, SetCompletion};
use pierre_workout::GraphBuilder;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub const ROUTINE_ID: &str = "push-day";

pub fn test_user() -> Uuid {
    Uuid::from_u128(0x5eed)
}

pub fn started_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

/// Timestamp `minutes` after the session start
pub fn minute(minutes: i64) -> DateTime<Utc> {
    started_at() + Duration::minutes(minutes)
}

pub fn exercise(id: &str, template: MeasurementTemplate) -> ExerciseDefinition {
    ExerciseDefinition::new(id, id.replace('-', " "), template)
}

pub fn block_row(id: &str, block_type: BlockType, order: u32, rest_sets: u32, rest_exercises: u32) -> RoutineBlock {
    RoutineBlock {
        id: id.into(),
        block_type,
        name: None,
        order_index: order,
        rest_between_sets_secs: rest_sets,
        rest_between_exercises_secs: rest_exercises,
    }
}

pub fn exercise_row(id: &str, block: &str, definition: ExerciseDefinition, order: u32) -> RoutineExercise {
    RoutineExercise {
        id: id.into(),
        block_id: block.into(),
        exercise: definition,
        order_index: order,
        notes: None,
    }
}

pub fn set_row(
    id: &str,
    exercise_row: &str,
    order: u32,
    template: MeasurementTemplate,
    planned_primary: Option<f64>,
    planned_secondary: Option<f64>,
) -> RoutineSet {
    RoutineSet {
        id: id.into(),
        routine_exercise_id: exercise_row.into(),
        order_index: order,
        template,
        set_type: SetType::Normal,
        planned_primary,
        planned_primary_range: None,
        planned_secondary,
        planned_secondary_range: None,
        planned_rpe: None,
        tempo: None,
    }
}

pub fn push_day() -> RoutineSnapshot {
    use MeasurementTemplate::{Time, WeightReps};

    let mut sets = Vec::new();
    for i in 0..3 {
        sets.push(set_row(&format!("s-bench-{i}"), "rx-bench", i, WeightReps, Some(60.0), Some(8.0)));
    }
    for i in 0..2 {
        sets.push(set_row(&format!("s-row-{i}"), "rx-row", i, WeightReps, None, Some(10.0)));
        sets.push(set_row(&format!("s-curl-{i}"), "rx-curl", i, WeightReps, None, Some(12.0)));
    }
    sets.push(set_row("s-jacks-0", "rx-jacks", 0, Time, Some(40.0), None));
    sets.push(set_row("s-jacks-1", "rx-jacks", 1, Time, Some(40.0), None));
    sets.push(set_row("s-climbers-0", "rx-climbers", 0, Time, None, None));
    sets.push(set_row("s-climbers-1", "rx-climbers", 1, Time, None, None));
    sets.push(set_row("s-plank-0", "rx-plank", 0, Time, Some(45.0), None));

    RoutineSnapshot {
        id: RoutineId::new(ROUTINE_ID),
        name: "Push Day".into(),
        blocks: vec![
            block_row("blk-bench", BlockType::Individual, 0, 90, 0),
            block_row("blk-super", BlockType::Superset, 1, 60, 0),
            block_row("blk-circuit", BlockType::Circuit, 2, 120, 15),
        ],
        exercises: vec![
            exercise_row("rx-bench", "blk-bench", exercise("bench-press", WeightReps), 0),
            exercise_row("rx-row", "blk-super", exercise("cable-row", WeightReps), 0),
            exercise_row("rx-curl", "blk-super", exercise("hammer-curl", WeightReps), 1),
            exercise_row("rx-jacks", "blk-circuit", exercise("jumping-jacks", Time), 0),
            exercise_row("rx-climbers", "blk-circuit", exercise("mountain-climbers", Time), 1),
            exercise_row("rx-plank", "blk-circuit", exercise("plank", Time), 2),
        ],
        sets,
    }
}

pub const PUSH_DAY_SETS: usize = 12;

pub fn build_graph(routine: &RoutineSnapshot) -> WorkoutGraph {
    init_test_logging();
    GraphBuilder::new(test_user(), WorkoutConfig::default())
        .started_at(started_at())
        .build(routine)
}

pub fn empty_graph() -> WorkoutGraph {
    init_test_logging();
    GraphBuilder::new(test_user(), WorkoutConfig::default())
        .started_at(started_at())
        .build_empty("Quick Session")
}

pub fn block_at(graph: &WorkoutGraph, block: usize) -> BlockId {
    graph.block_order()[block]
}

pub fn entry_at(graph: &WorkoutGraph, block: usize, exercise: usize) -> EntryId {
    graph.entry_ids(block_at(graph, block))[exercise]
}

pub fn set_at(graph: &WorkoutGraph, block: usize, exercise: usize, set: usize) -> SetId {
    graph.set_ids(entry_at(graph, block, exercise))[set]
}

/// Complete a set with explicit values and let the graph evaluate the record
pub fn complete(
    graph: &mut WorkoutGraph,
    set_id: SetId,
    primary: f64,
    secondary: Option<f64>,
    at: DateTime<Utc>,
) -> CompletionOutcome {
    graph
        .complete_set(
            set_id,
            SetCompletion {
                primary: Some(primary),
                secondary,
                ..SetCompletion::default()
            },
            at,
        )
        .expect("set exists")
}

/// Structural invariants plus the set-count identities every test relies on
pub fn assert_consistent(graph: &WorkoutGraph) {
    if let Err(error) = graph.check_consistency() {
        panic!("graph inconsistent: {error}");
    }
    let per_entry: usize = graph
        .block_order()
        .iter()
        .flat_map(|block_id| graph.entry_ids(*block_id))
        .map(|entry_id| graph.set_ids(*entry_id).len())
        .sum();
    assert_eq!(per_entry, graph.set_count());
    assert_eq!(graph.session().totals.planned_sets, graph.set_count());
}

/// Complete the set at `(block, exercise, set)` display position
pub fn complete_at(
    graph: &mut WorkoutGraph,
    (block, exercise, set): (usize, usize, usize),
    primary: f64,
    secondary: Option<f64>,
    at: DateTime<Utc>,
) -> CompletionOutcome {
    let set_id = set_at(graph, block, exercise, set);
    complete(graph, set_id, primary, secondary, at)
}
