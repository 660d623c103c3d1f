// ABOUTME: Measurement templates and value fields for workout sets
// ABOUTME: Maps each template to the measurement types of its primary and secondary values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// What a single recorded value measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementType {
    /// Load lifted (kg or lb, unit-agnostic here)
    Weight,
    /// Repetition count
    Reps,
    /// Duration in seconds
    Time,
    /// Distance in meters
    Distance,
}

impl MeasurementType {
    /// Whether values of this type carry forward to later sets
    ///
    /// Loads and distances usually stay the same from set to set, while reps and
    /// durations are the thing being worked on, so only the former are pre-filled
    /// and auto-filled.
    #[must_use]
    pub const fn carries_forward(self) -> bool {
        matches!(self, Self::Weight | Self::Distance)
    }
}

/// Which of the two recorded values of a set an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueField {
    /// First value of the template (e.g. weight for `weight_reps`)
    Primary,
    /// Second value of the template (e.g. reps for `weight_reps`)
    Secondary,
}

/// Measurement template of a set
///
/// The template names the measurement type of the primary value and, for two-value
/// templates, of the secondary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementTemplate {
    /// Weight x reps (barbell, dumbbell, machine work)
    WeightReps,
    /// Reps only (bodyweight work)
    Reps,
    /// Duration only (planks, timed circuit stations)
    Time,
    /// Distance only
    Distance,
    /// Distance covered in a duration (rowing, running)
    DistanceTime,
    /// Weight held for a duration (loaded carries for time)
    WeightTime,
    /// Weight carried over a distance (sled push, farmer's walk)
    WeightDistance,
}

impl MeasurementTemplate {
    /// All templates, in declaration order
    pub const ALL: [Self; 7] = [
        Self::WeightReps,
        Self::Reps,
        Self::Time,
        Self::Distance,
        Self::DistanceTime,
        Self::WeightTime,
        Self::WeightDistance,
    ];

    /// Measurement type of the primary value
    #[must_use]
    pub const fn primary_type(self) -> MeasurementType {
        match self {
            Self::WeightReps | Self::WeightTime | Self::WeightDistance => MeasurementType::Weight,
            Self::Reps => MeasurementType::Reps,
            Self::Time => MeasurementType::Time,
            Self::Distance | Self::DistanceTime => MeasurementType::Distance,
        }
    }

    /// Measurement type of the secondary value, if the template has one
    #[must_use]
    pub const fn secondary_type(self) -> Option<MeasurementType> {
        match self {
            Self::WeightReps => Some(MeasurementType::Reps),
            Self::DistanceTime | Self::WeightTime => Some(MeasurementType::Time),
            Self::WeightDistance => Some(MeasurementType::Distance),
            Self::Reps | Self::Time | Self::Distance => None,
        }
    }

    /// Measurement type recorded in `field`, if the template has that field
    #[must_use]
    pub const fn field_type(self, field: ValueField) -> Option<MeasurementType> {
        match field {
            ValueField::Primary => Some(self.primary_type()),
            ValueField::Secondary => self.secondary_type(),
        }
    }

    /// Whether the template records a single duration and nothing else
    #[must_use]
    pub const fn is_time_only(self) -> bool {
        matches!(self, Self::Time)
    }

    /// Stable snake-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeightReps => "weight_reps",
            Self::Reps => "reps",
            Self::Time => "time",
            Self::Distance => "distance",
            Self::DistanceTime => "distance_time",
            Self::WeightTime => "weight_time",
            Self::WeightDistance => "weight_distance",
        }
    }
}

impl fmt::Display for MeasurementTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementTemplate {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|template| template.as_str() == s)
            .ok_or_else(|| AppError::invalid_input(format!("Unknown measurement template: {s}")))
    }
}
