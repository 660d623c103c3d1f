// ABOUTME: Historical performance snapshots consumed by the active-workout runtime
// ABOUTME: PreviousSet history rows and current personal-record snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::measurement::{MeasurementTemplate, ValueField};
use crate::ids::ExerciseDefinitionId;

/// One historical set of an exercise, most recent first in history lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviousSet {
    /// Recorded primary value
    pub primary_value: Option<f64>,
    /// Recorded secondary value
    pub secondary_value: Option<f64>,
    /// Recorded RPE
    pub rpe: Option<f64>,
    /// Date of the session the set belongs to
    pub performed_at: DateTime<Utc>,
}

impl PreviousSet {
    /// Value recorded in `field`
    #[must_use]
    pub const fn value(&self, field: ValueField) -> Option<f64> {
        match field {
            ValueField::Primary => self.primary_value,
            ValueField::Secondary => self.secondary_value,
        }
    }
}

/// Current all-time personal record of an exercise, as persisted before this session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrSnapshot {
    /// Exercise definition the record belongs to
    pub exercise_id: ExerciseDefinitionId,
    /// Template the score was computed with
    pub template: MeasurementTemplate,
    /// Primary value of the record set
    pub primary_value: Option<f64>,
    /// Secondary value of the record set
    pub secondary_value: Option<f64>,
    /// Template-specific score
    pub score: f64,
    /// When the record was set
    pub achieved_at: DateTime<Utc>,
}
