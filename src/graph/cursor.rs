// ABOUTME: Transient UI cursor naming the block, exercise, set, or rest period being edited
// ABOUTME: Written by UI intent, read by cursor-driven operations, cleared after every mutation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::rest_timer::RestKind;
use crate::models::{BlockId, EntryId, SetId};

/// What the UI is currently operating on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutCursor {
    /// Selected block
    pub block_id: Option<BlockId>,
    /// Selected exercise entry
    pub entry_id: Option<EntryId>,
    /// Selected set
    pub set_id: Option<SetId>,
    /// Selected rest period of the block
    pub rest_kind: Option<RestKind>,
}

impl WorkoutCursor {
    /// Cursor pointing at a block's rest period
    #[must_use]
    pub const fn rest(block_id: BlockId, kind: RestKind) -> Self {
        Self {
            block_id: Some(block_id),
            entry_id: None,
            set_id: None,
            rest_kind: Some(kind),
        }
    }

    /// Cursor pointing at an exercise entry
    #[must_use]
    pub const fn entry(block_id: BlockId, entry_id: EntryId) -> Self {
        Self {
            block_id: Some(block_id),
            entry_id: Some(entry_id),
            set_id: None,
            rest_kind: None,
        }
    }

    /// Whether nothing is selected
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.block_id.is_none()
            && self.entry_id.is_none()
            && self.set_id.is_none()
            && self.rest_kind.is_none()
    }

    /// Forget the selection
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
