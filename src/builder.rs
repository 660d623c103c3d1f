// ABOUTME: Builds the in-memory workout graph from a persisted routine snapshot
// ABOUTME: Remaps persisted foreign keys to temporary ids and drops orphaned rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Graph Builder
//!
//! Routine rows arrive flat and reference their parents by persisted id. The builder
//! creates parents first, records `original id -> temporary id` for each, and resolves
//! children through those tables. A child whose parent never made it into a table is
//! dropped with a `debug!` line instead of failing the whole start.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use pierre_workout_intelligence::PrScoringRegistry;
use tracing::debug;
use uuid::Uuid;

use crate::config::WorkoutConfig;
use crate::graph::{Block, ExerciseEntry, Session, WorkoutGraph, WorkoutSet};
use crate::models::{
    BlockId, EntryId, RoutineBlock, RoutineExercise, RoutineSet, RoutineSnapshot,
    SessionInstanceId, SessionTotals,
};

/// Creates [`WorkoutGraph`] instances for a user
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    user_id: Uuid,
    config: WorkoutConfig,
    scoring: Arc<PrScoringRegistry>,
    started_at: DateTime<Utc>,
}

impl GraphBuilder {
    /// Builder for `user_id`, starting now with default PR scoring
    #[must_use]
    pub fn new(user_id: Uuid, config: WorkoutConfig) -> Self {
        let scoring = Arc::new(PrScoringRegistry::with_defaults(
            config.one_rep_max_algorithm,
        ));
        Self {
            user_id,
            config,
            scoring,
            started_at: Utc::now(),
        }
    }

    /// Use a specific scoring registry
    #[must_use]
    pub fn with_scoring(mut self, scoring: Arc<PrScoringRegistry>) -> Self {
        self.scoring = scoring;
        self
    }

    /// Use a specific start timestamp
    #[must_use]
    pub fn started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    /// Session with no blocks, referencing a freshly minted placeholder routine
    #[must_use]
    pub fn build_empty(self, name: &str) -> WorkoutGraph {
        let routine = RoutineSnapshot::quick_start(name);
        self.build(&routine)
    }

    /// Session graph mirroring `routine`
    #[must_use]
    pub fn build(self, routine: &RoutineSnapshot) -> WorkoutGraph {
        let session = Session {
            instance_id: SessionInstanceId::new(),
            user_id: self.user_id,
            routine_id: routine.id.clone(),
            routine_name: routine.name.clone(),
            started_at: self.started_at,
            finished_at: None,
            totals: SessionTotals::default(),
            original_set_count: 0,
            previously_performed: false,
        };
        let mut graph = WorkoutGraph::new(session, self.config, self.scoring);

        let block_ids = add_blocks(&mut graph, &routine.blocks);
        let entry_ids = add_exercises(&mut graph, &routine.exercises, &block_ids);
        add_sets(&mut graph, &routine.sets, &entry_ids);

        let empty_blocks: Vec<BlockId> = graph
            .block_order
            .iter()
            .copied()
            .filter(|id| graph.entry_ids(*id).is_empty())
            .collect();
        for block_id in empty_blocks {
            debug!(block = %block_id, "Dropping routine block without exercises");
            graph.detach_block(block_id);
        }
        graph.reindex_blocks();

        let block_order = graph.block_order.clone();
        for block_id in block_order {
            graph.promote_if_multi(block_id);
            graph.demote_if_single(block_id);
            if let Some(block) = graph.blocks.get_mut(&block_id) {
                block.modified_during_workout = false;
            }
        }

        graph.refresh_totals();
        graph.session.original_set_count = graph.sets.len();
        debug!(
            routine = %routine.id,
            blocks = graph.block_order.len(),
            sets = graph.sets.len(),
            "Built workout graph"
        );
        graph
    }
}

fn add_blocks<'r>(graph: &mut WorkoutGraph, rows: &'r [RoutineBlock]) -> HashMap<&'r str, BlockId> {
    let mut sorted: Vec<&RoutineBlock> = rows.iter().collect();
    sorted.sort_by_key(|row| row.order_index);

    let mut table = HashMap::with_capacity(sorted.len());
    for row in sorted {
        let id = graph.ids.block();
        graph.insert_block(
            Block {
                id,
                block_type: row.block_type,
                name: row.name.clone(),
                order_index: 0,
                rest_between_sets_secs: row.rest_between_sets_secs,
                rest_between_exercises_secs: row.rest_between_exercises_secs,
                added_during_workout: false,
                modified_during_workout: false,
            },
            usize::MAX,
        );
        table.insert(row.id.as_str(), id);
    }
    table
}

fn add_exercises<'r>(
    graph: &mut WorkoutGraph,
    rows: &'r [RoutineExercise],
    blocks: &HashMap<&str, BlockId>,
) -> HashMap<&'r str, EntryId> {
    let mut sorted: Vec<&RoutineExercise> = rows.iter().collect();
    sorted.sort_by_key(|row| row.order_index);

    let mut table = HashMap::with_capacity(sorted.len());
    for row in sorted {
        let Some(block_id) = blocks.get(row.block_id.as_str()).copied() else {
            debug!(
                exercise_row = %row.id,
                block_row = %row.block_id,
                "Dropping routine exercise with unknown block"
            );
            continue;
        };
        let id = graph.ids.entry();
        let appended = graph.append_entry(ExerciseEntry {
            id,
            block_id,
            exercise: row.exercise.clone(),
            order_index: 0,
            first_completed_at: None,
            notes: row.notes.clone(),
            current_pr: None,
            added_during_workout: false,
            replaced: false,
        });
        if appended.is_some() {
            table.insert(row.id.as_str(), id);
        }
    }
    table
}

fn add_sets(graph: &mut WorkoutGraph, rows: &[RoutineSet], entries: &HashMap<&str, EntryId>) {
    let mut sorted: Vec<&RoutineSet> = rows.iter().collect();
    sorted.sort_by_key(|row| row.order_index);

    for row in sorted {
        let Some(entry_id) = entries.get(row.routine_exercise_id.as_str()).copied() else {
            debug!(
                set_row = %row.id,
                exercise_row = %row.routine_exercise_id,
                "Dropping routine set with unknown exercise"
            );
            continue;
        };
        let id = graph.ids.set();
        let mut set = WorkoutSet::blank(id, entry_id, 0, row.template);
        set.set_type = row.set_type;
        set.planned_primary = row.planned_primary;
        set.planned_primary_range = row.planned_primary_range;
        set.planned_secondary = row.planned_secondary;
        set.planned_secondary_range = row.planned_secondary_range;
        set.planned_rpe = row.planned_rpe;
        set.tempo.clone_from(&row.tempo);
        let _ = graph.append_set(set);
    }
}
