// ABOUTME: Mutation operations on the active workout graph
// ABOUTME: Block, exercise, and set edits that keep indexes, counts, and records consistent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Mutations
//!
//! Every operation is one synchronous transform on `&mut WorkoutGraph`. An operation
//! whose target no longer exists does nothing and reports that through its return value
//! (`false` or `None`). A UI that double-taps delete or edits a set removed a moment ago
//! must never see an error.
//!
//! Each successful operation ends by clearing the transient cursor.

/// Block-level operations
pub mod blocks;

/// Exercise-level operations
pub mod exercises;

/// Set-level operations
pub mod sets;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::graph::RestDecision;
use crate::history::HistoryLoadTask;
use crate::models::{BlockId, BlockType};

/// Kind of block created by an add-block operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewBlockKind {
    /// One individual block per exercise
    Individual,
    /// One superset holding every exercise
    Superset,
    /// One circuit holding every exercise
    Circuit,
}

impl From<NewBlockKind> for BlockType {
    fn from(kind: NewBlockKind) -> Self {
        match kind {
            NewBlockKind::Individual => Self::Individual,
            NewBlockKind::Superset => Self::Superset,
            NewBlockKind::Circuit => Self::Circuit,
        }
    }
}

/// Blocks created by an add-block operation and the history they need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockAddition {
    /// New blocks in display order
    pub block_ids: Vec<BlockId>,
    /// History lookup for the added exercises
    pub history: HistoryLoadTask,
}

/// Values submitted when a set is completed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SetCompletion {
    /// Final primary value; keeps the current actual value when absent
    pub primary: Option<f64>,
    /// Final secondary value; keeps the current actual value when absent
    pub secondary: Option<f64>,
    /// RPE; keeps the current actual RPE when absent
    pub rpe: Option<f64>,
    /// Caller's verdict on the persisted record; evaluated by the graph when absent
    pub personal_record: Option<bool>,
}

/// Effects of completing a set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// Rest started by the completion
    pub rest: Option<RestDecision>,
    /// The set became the session best of its exercise
    pub session_best: bool,
    /// When the set was completed
    pub completed_at: DateTime<Utc>,
}
