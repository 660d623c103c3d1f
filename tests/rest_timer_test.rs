// ABOUTME: Integration tests for the rest policy and rest timer lifecycle
// ABOUTME: Covers individual, superset, and circuit blocks plus skip, adjust, and restart
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{block_at, build_graph, complete, complete_at, entry_at, minute, push_day, set_at};
use pierre_workout::graph::{RestDecision, RestKind};
use pierre_workout::models::SetType;

const fn between_sets(secs: u32) -> Option<RestDecision> {
    Some(RestDecision {
        kind: RestKind::BetweenSets,
        duration_secs: secs,
    })
}

const fn between_exercises(secs: u32) -> Option<RestDecision> {
    Some(RestDecision {
        kind: RestKind::BetweenExercises,
        duration_secs: secs,
    })
}

#[test]
fn test_individual_no_rest_before_drop_set() {
    let mut graph = build_graph(&push_day());
    assert!(graph.update_set_type(set_at(&graph, 0, 0, 1), SetType::Drop));

    let outcome = complete_at(&mut graph, (0, 0, 0), 60.0, Some(8.0), minute(1));
    assert_eq!(outcome.rest, None);
    assert!(graph.rest_timer().is_none());

    let outcome = complete_at(&mut graph, (0, 0, 1), 45.0, Some(6.0), minute(2));
    assert_eq!(outcome.rest, between_sets(90));
    let timer = graph.rest_timer().unwrap();
    assert!(timer.active);
    assert_eq!(timer.block_id, block_at(&graph, 0));
    assert_eq!(timer.remaining_secs(minute(2)), 90);
    assert_eq!(timer.remaining_secs(minute(3)), 30);
}

#[test]
fn test_zero_rest_starts_no_timer() {
    let mut graph = build_graph(&push_day());
    assert!(graph.update_block_rest(block_at(&graph, 0), RestKind::BetweenSets, 0));

    let outcome = complete_at(&mut graph, (0, 0, 0), 60.0, Some(8.0), minute(1));
    assert_eq!(outcome.rest, None);
    assert!(graph.rest_timer().is_none());
}

#[test]
fn test_superset_rests_after_last_exercise_only() {
    let mut graph = build_graph(&push_day());

    let row = complete_at(&mut graph, (1, 0, 0), 50.0, Some(10.0), minute(10));
    assert_eq!(row.rest, None);

    let curl = complete_at(&mut graph, (1, 1, 0), 14.0, Some(12.0), minute(11));
    assert_eq!(curl.rest, between_sets(60));
    assert_eq!(graph.rest_timer().unwrap().kind, RestKind::BetweenSets);
}

#[test]
fn test_circuit_rest_between_exercises_and_rounds() {
    let mut graph = build_graph(&push_day());

    let jacks = complete_at(&mut graph, (2, 0, 0), 40.0, None, minute(20));
    assert_eq!(jacks.rest, between_exercises(15));

    let climbers = complete_at(&mut graph, (2, 1, 0), 30.0, None, minute(21));
    assert_eq!(climbers.rest, between_exercises(15));

    let plank = complete_at(&mut graph, (2, 2, 0), 45.0, None, minute(22));
    assert_eq!(plank.rest, between_sets(120));
    let timer = graph.rest_timer().unwrap();
    assert_eq!(timer.kind, RestKind::BetweenSets);
    assert_eq!(timer.total_secs, 120);
}

#[test]
fn test_circuit_short_exercise_keeps_positional_last() {
    let mut graph = build_graph(&push_day());
    for (exercise, at) in [(0, 20), (1, 21), (2, 22)] {
        complete_at(&mut graph, (2, exercise, 0), 30.0, None, minute(at));
    }

    complete_at(&mut graph, (2, 0, 1), 30.0, None, minute(25));
    let climbers = complete_at(&mut graph, (2, 1, 1), 30.0, None, minute(26));
    assert_eq!(climbers.rest, between_exercises(15));
}

#[test]
fn test_circuit_final_round_last_exercise_has_no_rest() {
    let mut graph = build_graph(&push_day());
    let plank = entry_at(&graph, 2, 2);
    let plank_second = graph.add_set(plank).unwrap();

    for (exercise, at) in [(0, 20), (1, 21), (2, 22)] {
        complete_at(&mut graph, (2, exercise, 0), 30.0, None, minute(at));
    }
    complete_at(&mut graph, (2, 0, 1), 30.0, None, minute(25));
    complete_at(&mut graph, (2, 1, 1), 30.0, None, minute(26));

    let last = complete(&mut graph, plank_second, 45.0, None, minute(27));
    assert_eq!(last.rest, None);
}

#[test]
fn test_completion_restarts_running_timer_in_place() {
    let mut graph = build_graph(&push_day());
    complete_at(&mut graph, (0, 0, 0), 60.0, Some(8.0), minute(1));
    let started = graph.rest_timer().unwrap().started_at;

    complete_at(&mut graph, (1, 1, 0), 14.0, Some(12.0), minute(2));
    let timer = graph.rest_timer().unwrap();
    assert!(timer.active);
    assert_eq!(timer.block_id, block_at(&graph, 1));
    assert_eq!(timer.total_secs, 60);
    assert!(timer.started_at > started);
}

#[test]
fn test_skip_and_adjust_rest_timer() {
    let mut graph = build_graph(&push_day());
    assert!(!graph.skip_rest_timer());
    assert!(!graph.adjust_rest_timer(30, minute(0)));

    complete_at(&mut graph, (0, 0, 0), 60.0, Some(8.0), minute(1));
    let twenty_secs_in = minute(1) + Duration::seconds(20);
    assert!(graph.adjust_rest_timer(30, twenty_secs_in));
    let timer = graph.rest_timer().unwrap();
    assert_eq!(timer.remaining_secs(twenty_secs_in), 100);
    assert_eq!(timer.total_secs, 120);

    assert!(graph.skip_rest_timer());
    assert!(!graph.rest_timer().unwrap().active);
    assert_eq!(graph.rest_timer().unwrap().remaining_secs(twenty_secs_in), 0);
    assert!(!graph.skip_rest_timer());
}

#[test]
fn test_removing_under_zero_stops_timer() {
    let mut graph = build_graph(&push_day());
    complete_at(&mut graph, (0, 0, 0), 60.0, Some(8.0), minute(1));
    assert!(graph.adjust_rest_timer(-600, minute(1)));
    assert!(!graph.rest_timer().unwrap().active);
}

#[test]
fn test_deleting_block_clears_its_timer() {
    let mut graph = build_graph(&push_day());
    complete_at(&mut graph, (0, 0, 0), 60.0, Some(8.0), minute(1));
    assert!(graph.rest_timer().is_some());

    assert!(graph.delete_block(block_at(&graph, 1)));
    assert!(graph.rest_timer().is_some());

    assert!(graph.delete_block(block_at(&graph, 0)));
    assert!(graph.rest_timer().is_none());
}
