// ABOUTME: Pluggable per-template scoring strategies for personal-record comparison
// ABOUTME: Registry maps each measurement template to the strategy that scores its sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Personal-Record Scoring
//!
//! A score is a single number where higher is better. Scores are only ever compared
//! between sets of the same exercise and template, so strategies are free to pick
//! whatever monotonic formula suits their template.
//!
//! Comparison is strict: a new score must be greater than the current best to replace
//! it, so repeating a record does not create a new one.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use pierre_workout_core::models::{MeasurementTemplate, PrSnapshot};
use tracing::debug;

use crate::algorithms::one_rep_max::OneRepMaxAlgorithm;

/// Scores the recorded values of a completed set
pub trait ScoringStrategy: Send + Sync {
    /// Strategy name for logging
    fn name(&self) -> &'static str;

    /// Score a set, or `None` if the values are insufficient to score it
    fn score(&self, primary: Option<f64>, secondary: Option<f64>) -> Option<f64>;
}

/// Weight x reps scored by estimated one-rep max
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedOneRepMax {
    algorithm: OneRepMaxAlgorithm,
}

impl EstimatedOneRepMax {
    /// Strategy using the given estimation formula
    #[must_use]
    pub const fn new(algorithm: OneRepMaxAlgorithm) -> Self {
        Self { algorithm }
    }
}

impl ScoringStrategy for EstimatedOneRepMax {
    fn name(&self) -> &'static str {
        "estimated_one_rep_max"
    }

    fn score(&self, primary: Option<f64>, secondary: Option<f64>) -> Option<f64> {
        self.algorithm.estimate(primary?, secondary?)
    }
}

/// Single-value templates scored by the value itself (more reps, longer hold, farther)
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryValue;

impl ScoringStrategy for PrimaryValue {
    fn name(&self) -> &'static str {
        "primary_value"
    }

    fn score(&self, primary: Option<f64>, _secondary: Option<f64>) -> Option<f64> {
        primary.filter(|value| value.is_finite() && *value > 0.0)
    }
}

/// Distance over time scored by average speed (meters per second)
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageSpeed;

impl ScoringStrategy for AverageSpeed {
    fn name(&self) -> &'static str {
        "average_speed"
    }

    fn score(&self, primary: Option<f64>, secondary: Option<f64>) -> Option<f64> {
        let distance = primary.filter(|d| d.is_finite() && *d > 0.0)?;
        let seconds = secondary.filter(|t| t.is_finite() && *t > 0.0)?;
        Some(distance / seconds)
    }
}

/// Two-value loaded templates scored by the product of both values
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueProduct;

impl ScoringStrategy for ValueProduct {
    fn name(&self) -> &'static str {
        "value_product"
    }

    fn score(&self, primary: Option<f64>, secondary: Option<f64>) -> Option<f64> {
        let product = primary? * secondary?;
        (product.is_finite() && product > 0.0).then_some(product)
    }
}

/// Dispatches scoring to the strategy registered for each template
#[derive(Clone)]
pub struct PrScoringRegistry {
    strategies: HashMap<MeasurementTemplate, Arc<dyn ScoringStrategy>>,
}

impl PrScoringRegistry {
    /// Registry with no strategies; every score is `None`
    #[must_use]
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registry with the default strategy for every template
    #[must_use]
    pub fn with_defaults(one_rep_max: OneRepMaxAlgorithm) -> Self {
        let mut registry = Self::empty();
        registry.register(
            MeasurementTemplate::WeightReps,
            Arc::new(EstimatedOneRepMax::new(one_rep_max)),
        );
        for template in [
            MeasurementTemplate::Reps,
            MeasurementTemplate::Time,
            MeasurementTemplate::Distance,
        ] {
            registry.register(template, Arc::new(PrimaryValue));
        }
        registry.register(MeasurementTemplate::DistanceTime, Arc::new(AverageSpeed));
        registry.register(MeasurementTemplate::WeightTime, Arc::new(ValueProduct));
        registry.register(MeasurementTemplate::WeightDistance, Arc::new(ValueProduct));
        registry
    }

    /// Register (or replace) the strategy for a template
    pub fn register(&mut self, template: MeasurementTemplate, strategy: Arc<dyn ScoringStrategy>) {
        if let Some(previous) = self.strategies.insert(template, strategy) {
            debug!(
                template = %template,
                replaced = previous.name(),
                "Replaced PR scoring strategy"
            );
        }
    }

    /// Score a set recorded with `template`
    #[must_use]
    pub fn score(
        &self,
        template: MeasurementTemplate,
        primary: Option<f64>,
        secondary: Option<f64>,
    ) -> Option<f64> {
        self.strategies
            .get(&template)
            .and_then(|strategy| strategy.score(primary, secondary))
    }

    /// Whether `candidate` strictly beats `current`
    #[must_use]
    pub fn is_improvement(candidate: f64, current: Option<f64>) -> bool {
        match current {
            Some(best) => candidate > best,
            None => true,
        }
    }

    /// Whether a score recorded with `template` beats the persisted record
    ///
    /// With no persisted record the score always qualifies: the first time an exercise is
    /// performed sets the record. A record stored under a different template is not
    /// comparable and is treated as absent.
    #[must_use]
    pub fn qualifies_against(
        template: MeasurementTemplate,
        score: f64,
        historical: Option<&PrSnapshot>,
    ) -> bool {
        let baseline = historical
            .filter(|record| record.template == template)
            .map(|record| record.score);
        Self::is_improvement(score, baseline)
    }
}

impl Default for PrScoringRegistry {
    fn default() -> Self {
        Self::with_defaults(OneRepMaxAlgorithm::default())
    }
}

impl fmt::Debug for PrScoringRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<(&'static str, &'static str)> = self
            .strategies
            .iter()
            .map(|(template, strategy)| (template.as_str(), strategy.name()))
            .collect();
        entries.sort_unstable();
        f.debug_struct("PrScoringRegistry")
            .field("strategies", &entries)
            .finish()
    }
}
