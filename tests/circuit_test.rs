// ABOUTME: Integration tests for circuit round walks and the circuit timer plan
// ABOUTME: Validates round completion, needs-creation targets, and timer eligibility
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{block_at, build_graph, complete, complete_at, entry_at, minute, push_day, set_at};
use pierre_workout::derivation::{BlockProgress, NextSetInfo, NextSetTarget};

#[test]
fn test_round_walk_flags_missing_set_for_short_exercise() {
    let mut graph = build_graph(&push_day());
    let circuit = block_at(&graph, 2);
    let jacks = entry_at(&graph, 2, 0);
    let plank = entry_at(&graph, 2, 2);

    for exercise in 0..3 {
        complete_at(&mut graph, (2, exercise, 0), 30.0, None, minute(20));
    }

    assert_eq!(
        graph.next_set_in_block(circuit),
        Some(BlockProgress::Next(NextSetInfo {
            entry_id: jacks,
            round: 1,
            target: NextSetTarget::Existing(set_at(&graph, 2, 0, 1)),
            completed_rounds: 1,
        }))
    );
    assert_eq!(
        graph.next_set_for_exercise(circuit, plank),
        Some(BlockProgress::Next(NextSetInfo {
            entry_id: plank,
            round: 1,
            target: NextSetTarget::NeedsCreation,
            completed_rounds: 1,
        }))
    );
}

#[test]
fn test_round_walk_reports_complete_block() {
    let mut graph = build_graph(&push_day());
    let superset = block_at(&graph, 1);
    for round in 0..2 {
        for exercise in 0..2 {
            complete_at(&mut graph, (1, exercise, round), 20.0, Some(10.0), minute(5));
        }
    }
    assert_eq!(
        graph.next_set_in_block(superset),
        Some(BlockProgress::Complete { rounds: 2 })
    );
}

#[test]
fn test_round_walk_is_round_major() {
    let mut graph = build_graph(&push_day());
    let superset = block_at(&graph, 1);
    complete_at(&mut graph, (1, 0, 0), 50.0, Some(10.0), minute(5));
    complete_at(&mut graph, (1, 0, 1), 50.0, Some(10.0), minute(6));

    assert_eq!(
        graph.next_set_in_block(superset),
        Some(BlockProgress::Next(NextSetInfo {
            entry_id: entry_at(&graph, 1, 1),
            round: 0,
            target: NextSetTarget::Existing(set_at(&graph, 1, 1, 0)),
            completed_rounds: 0,
        }))
    );
}

#[test]
fn test_round_walk_ignores_unknown_entry() {
    let graph = build_graph(&push_day());
    let bench = entry_at(&graph, 0, 0);
    assert_eq!(graph.next_set_for_exercise(block_at(&graph, 2), bench), None);
}

#[test]
fn test_only_time_circuits_are_timer_eligible() {
    let graph = build_graph(&push_day());
    assert!(!graph.is_circuit_timer_eligible(block_at(&graph, 0)));
    assert!(!graph.is_circuit_timer_eligible(block_at(&graph, 1)));
    assert!(graph.is_circuit_timer_eligible(block_at(&graph, 2)));
    assert!(graph.circuit_timer_plan(block_at(&graph, 1)).is_none());
}

#[test]
fn test_circuit_timer_plan_targets_and_progress() {
    let mut graph = build_graph(&push_day());
    let circuit = block_at(&graph, 2);
    let plan = graph.circuit_timer_plan(circuit).unwrap();

    assert_eq!(plan.total_rounds, 2);
    let targets: Vec<Vec<u32>> = plan
        .exercises
        .iter()
        .map(|exercise| exercise.slots.iter().map(|slot| slot.target_secs).collect())
        .collect();
    assert_eq!(targets, vec![vec![40, 40], vec![30, 30], vec![45]]);

    let first = plan.next_item().unwrap();
    assert_eq!(first.set_id, set_at(&graph, 2, 0, 0));
    assert_eq!(first.round, 0);
    assert!(!first.is_last_exercise_in_round);
    assert!(!first.is_last_round);

    for exercise in 0..3 {
        complete_at(&mut graph, (2, exercise, 0), 30.0, None, minute(20));
    }
    complete_at(&mut graph, (2, 0, 1), 40.0, None, minute(22));

    let plan = graph.circuit_timer_plan(circuit).unwrap();
    let item = plan.next_item().unwrap();
    assert_eq!(item.entry_id, entry_at(&graph, 2, 1));
    assert_eq!(item.round, 1);
    assert_eq!(item.exercise_index, 1);
    assert!(item.is_last_exercise_in_round);
    assert!(item.is_last_round);

    complete(&mut graph, item.set_id, 30.0, None, minute(23));
    assert!(graph.circuit_timer_plan(circuit).unwrap().is_complete());
}
