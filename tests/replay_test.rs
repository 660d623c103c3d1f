// ABOUTME: Integration tests for scripted command replay against the runtime
// ABOUTME: Validates positional addressing, no-op reporting, history loads, and script loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::io::Write;
use std::sync::Arc;

use chrono::Duration;
use common::{exercise, init_test_logging, push_day, started_at, test_user, PUSH_DAY_SETS, ROUTINE_ID};
use pierre_workout::config::WorkoutConfig;
use pierre_workout::errors::ErrorCode;
use pierre_workout::models::{MeasurementTemplate, RoutineId, RoutineSnapshot, ValueField};
use pierre_workout::mutations::{NewBlockKind, SetCompletion};
use pierre_workout::replay::{load_json, replay, ReplayCommand, REPLAY_STEP_SECS};
use pierre_workout::repository::InMemoryWorkoutRepository;
use pierre_workout::WorkoutRuntime;
use tempfile::NamedTempFile;

fn runtime() -> WorkoutRuntime {
    init_test_logging();
    let repository = Arc::new(InMemoryWorkoutRepository::new().with_routine(push_day()));
    WorkoutRuntime::new(repository, test_user(), WorkoutConfig::default())
}

fn completion(primary: f64, secondary: f64) -> SetCompletion {
    SetCompletion {
        primary: Some(primary),
        secondary: Some(secondary),
        ..SetCompletion::default()
    }
}

#[tokio::test]
async fn test_replay_reports_each_step() {
    let mut runtime = runtime();
    runtime
        .start_from_routine(&RoutineId::new(ROUTINE_ID), started_at())
        .await
        .unwrap();

    let commands = vec![
        ReplayCommand::Complete {
            block: 0,
            exercise: 0,
            set: 0,
            values: completion(60.0, 8.0),
        },
        ReplayCommand::UpdateValue {
            block: 0,
            exercise: 0,
            set: 1,
            field: ValueField::Primary,
            value: Some(65.0),
        },
        ReplayCommand::SkipRest,
        ReplayCommand::SkipRest,
        ReplayCommand::DeleteBlock { block: 9 },
        ReplayCommand::AddBlock {
            kind: NewBlockKind::Individual,
            exercises: vec![exercise("squat", MeasurementTemplate::WeightReps)],
        },
        ReplayCommand::Complete {
            block: 3,
            exercise: 0,
            set: 0,
            values: completion(100.0, 5.0),
        },
        ReplayCommand::ReorderBlocks {
            order: vec![3, 0, 1, 2],
        },
    ];

    let report = replay(&mut runtime, &commands, started_at()).await.unwrap();
    let applied: Vec<bool> = report.steps.iter().map(|step| step.applied).collect();
    assert_eq!(
        applied,
        vec![true, true, true, false, false, true, true, true]
    );
    assert_eq!(report.steps[0].op, "complete");
    assert_eq!(report.steps[0].rest_secs, Some(90));
    assert_eq!(report.steps[6].rest_secs, Some(90));
    assert_eq!(report.steps[4].op, "delete_block");

    let session = &report.session;
    assert_eq!(session.blocks.len(), 4);
    assert_eq!(session.blocks[0].exercises[0].exercise_id.as_str(), "squat");
    assert_eq!(session.totals.completed_sets, 2);
    assert_eq!(session.totals.planned_sets, PUSH_DAY_SETS + 3);
    assert!(session.structure_changed);
    assert_eq!(
        session.finished_at,
        started_at() + Duration::seconds(REPLAY_STEP_SECS * 8)
    );

    let bench = &session.blocks[1].exercises[0].sets;
    assert_eq!(bench[1].actual_primary, Some(65.0));
    assert!(!bench[1].completed);
}

#[tokio::test]
async fn test_replay_without_workout_fails() {
    let mut runtime = runtime();
    let error = replay(&mut runtime, &[ReplayCommand::SkipRest], started_at())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidState);
}

#[tokio::test]
async fn test_replay_leaves_workout_active() {
    let mut runtime = runtime();
    runtime.start_empty("Quick Session", started_at());

    let report = replay(&mut runtime, &[], started_at()).await.unwrap();
    assert!(report.steps.is_empty());
    assert!(report.session.blocks.is_empty());
    assert!(runtime.is_active());
}

#[test]
fn test_load_json_reads_routine_and_script() {
    let mut routine_file = NamedTempFile::new().unwrap();
    serde_json::to_writer(&mut routine_file, &push_day()).unwrap();
    let routine: RoutineSnapshot = load_json(routine_file.path()).unwrap();
    assert_eq!(routine.id, RoutineId::new(ROUTINE_ID));
    assert_eq!(routine.blocks.len(), 3);

    let mut script = NamedTempFile::new().unwrap();
    write!(
        script,
        r#"[{{"op": "add_set", "block": 0, "exercise": 0}}, {{"op": "adjust_rest", "delta_secs": -15}}]"#
    )
    .unwrap();
    let commands: Vec<ReplayCommand> = load_json(script.path()).unwrap();
    assert_eq!(
        commands,
        vec![
            ReplayCommand::AddSet {
                block: 0,
                exercise: 0
            },
            ReplayCommand::AdjustRest { delta_secs: -15 },
        ]
    );
}

#[test]
fn test_load_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = load_json::<Vec<ReplayCommand>>(&dir.path().join("missing.json")).unwrap_err();
    assert_eq!(missing.code, ErrorCode::InvalidInput);

    let mut broken = NamedTempFile::new().unwrap();
    write!(broken, r#"[{{"op": "levitate"}}]"#).unwrap();
    let error = load_json::<Vec<ReplayCommand>>(broken.path()).unwrap_err();
    assert_eq!(error.code, ErrorCode::SerializationError);
}
