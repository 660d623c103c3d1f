// ABOUTME: Strongly typed identifiers for active-workout entities and persisted records
// ABOUTME: Temporary ids are session-local counters; persisted ids are opaque strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Identifiers
//!
//! Entities inside an active session are addressed by temporary handles that only live
//! as long as the session graph. Persisted identifiers are assigned by the persistence
//! collaborator and are never minted here, except for quick-start placeholder routines.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! temporary_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw counter value
            #[must_use]
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// Raw counter value
            #[must_use]
            pub const fn raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!("tmp-", $prefix, "-{}"), self.0)
            }
        }
    };
}

temporary_id!(
    /// Session-local identifier of a block
    BlockId,
    "block"
);
temporary_id!(
    /// Session-local identifier of an exercise placed in a block
    EntryId,
    "entry"
);
temporary_id!(
    /// Session-local identifier of a set
    SetId,
    "set"
);

/// Allocates temporary ids from a single monotonically increasing counter
///
/// Ids are never reused within a session, so a handle captured before a deletion can
/// never alias an entity created afterwards.
#[derive(Debug, Clone, Default)]
pub struct TempIdAllocator {
    next: u64,
}

impl TempIdAllocator {
    /// Create an allocator starting at 1
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    fn bump(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    /// Allocate a block id
    pub fn block(&mut self) -> BlockId {
        BlockId(self.bump())
    }

    /// Allocate an entry id
    pub fn entry(&mut self) -> EntryId {
        EntryId(self.bump())
    }

    /// Allocate a set id
    pub fn set(&mut self) -> SetId {
        SetId(self.bump())
    }
}

macro_rules! persisted_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a persisted identifier
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

persisted_id!(
    /// Persisted routine identifier
    RoutineId
);
persisted_id!(
    /// Persisted exercise definition identifier
    ExerciseDefinitionId
);

/// Identity of one active session instance
///
/// Asynchronous lookups capture this value when they are issued and are only merged back
/// while the same instance is still active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionInstanceId(Uuid);

impl SessionInstanceId {
    /// Mint a fresh instance id
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionInstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
