// ABOUTME: Integration tests for value edits and auto-fill propagation to later sets
// ABOUTME: Validates carry-forward fields, manual overrides, completed sets, and planned values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{assert_consistent, build_graph, complete, entry_at, minute, push_day, set_at};
use pierre_workout::graph::WorkoutGraph;
use pierre_workout::models::{SetId, ValueField};

/// Cable rows with a third set added: three open sets without a planned weight
fn rows() -> (WorkoutGraph, Vec<SetId>) {
    let mut graph = build_graph(&push_day());
    let row = entry_at(&graph, 1, 0);
    graph.add_set(row).unwrap();
    let sets = graph.set_ids(row).to_vec();
    assert_eq!(sets.len(), 3);
    (graph, sets)
}

fn weights(graph: &WorkoutGraph, sets: &[SetId]) -> Vec<Option<f64>> {
    sets.iter()
        .map(|id| graph.set(*id).unwrap().actual_primary)
        .collect()
}

#[test]
fn test_weight_edit_propagates_to_matching_later_sets() {
    let (mut graph, sets) = rows();

    assert_eq!(
        graph.update_set_value(sets[0], ValueField::Primary, Some(20.0)),
        Some(2)
    );
    assert_eq!(weights(&graph, &sets), vec![Some(20.0); 3]);

    assert_eq!(
        graph.update_set_value(sets[0], ValueField::Primary, Some(25.0)),
        Some(2)
    );
    assert_eq!(weights(&graph, &sets), vec![Some(25.0); 3]);
    assert_consistent(&graph);
}

#[test]
fn test_manually_changed_set_is_left_alone() {
    let (mut graph, sets) = rows();
    graph.update_set_value(sets[0], ValueField::Primary, Some(20.0));
    assert_eq!(
        graph.update_set_value(sets[2], ValueField::Primary, Some(22.0)),
        Some(0)
    );

    assert_eq!(
        graph.update_set_value(sets[0], ValueField::Primary, Some(25.0)),
        Some(1)
    );
    assert_eq!(
        weights(&graph, &sets),
        vec![Some(25.0), Some(25.0), Some(22.0)]
    );
}

#[test]
fn test_earlier_sets_are_never_touched() {
    let (mut graph, sets) = rows();
    graph.update_set_value(sets[0], ValueField::Primary, Some(20.0));
    graph.update_set_value(sets[1], ValueField::Primary, Some(30.0));
    assert_eq!(
        weights(&graph, &sets),
        vec![Some(20.0), Some(30.0), Some(30.0)]
    );
}

#[test]
fn test_completed_sets_do_not_receive_autofill() {
    let (mut graph, sets) = rows();
    graph.update_set_value(sets[0], ValueField::Primary, Some(20.0));
    complete(&mut graph, sets[1], 20.0, Some(10.0), minute(5));

    assert_eq!(
        graph.update_set_value(sets[0], ValueField::Primary, Some(25.0)),
        Some(1)
    );
    assert_eq!(
        weights(&graph, &sets),
        vec![Some(25.0), Some(20.0), Some(25.0)]
    );
}

#[test]
fn test_reps_do_not_carry_forward() {
    let (mut graph, sets) = rows();
    assert_eq!(
        graph.update_set_value(sets[0], ValueField::Secondary, Some(10.0)),
        Some(0)
    );
    assert_eq!(graph.set(sets[0]).unwrap().actual_secondary, Some(10.0));
    assert_eq!(graph.set(sets[1]).unwrap().actual_secondary, None);
    assert!(graph.set(sets[0]).unwrap().modified);
}

#[test]
fn test_planned_weight_disables_propagation() {
    let mut graph = build_graph(&push_day());
    let bench = graph.set_ids(entry_at(&graph, 0, 0)).to_vec();

    assert_eq!(
        graph.update_set_value(bench[0], ValueField::Primary, Some(65.0)),
        Some(0)
    );
    assert_eq!(weights(&graph, &bench), vec![Some(65.0), None, None]);
}

#[test]
fn test_unchanged_value_does_not_propagate() {
    let (mut graph, sets) = rows();
    graph.update_set_value(sets[0], ValueField::Primary, Some(20.0));
    graph.update_set_value(sets[2], ValueField::Primary, Some(22.0));
    assert_eq!(
        graph.update_set_value(sets[1], ValueField::Primary, Some(20.0)),
        Some(0)
    );
    assert_eq!(weights(&graph, &sets)[2], Some(22.0));
}

#[test]
fn test_volume_follows_edits_of_completed_sets() {
    let mut graph = build_graph(&push_day());
    let set = set_at(&graph, 0, 0, 0);
    complete(&mut graph, set, 60.0, Some(8.0), minute(1));
    assert!((graph.session().totals.total_volume - 480.0).abs() < f64::EPSILON);

    graph.update_set_value(set, ValueField::Secondary, Some(10.0));
    assert!((graph.session().totals.total_volume - 600.0).abs() < f64::EPSILON);
}
