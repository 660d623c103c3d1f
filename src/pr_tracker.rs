// ABOUTME: Session-best personal record tracking per exercise definition
// ABOUTME: Scores completed sets, keeps one flagged record per exercise, re-derives on removal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # PR Session Tracker
//!
//! At most one set per exercise definition carries the personal-record flag, and the
//! `session_bests` map points at exactly that set. A candidate replaces the current
//! session best only on a strictly greater score. When the record set stops counting
//! (uncompleted or deleted) the best remaining completed set is promoted, provided it
//! beats the persisted all-time record. Without a persisted record any score qualifies.

use chrono::{DateTime, Utc};
use pierre_workout_intelligence::PrScoringRegistry;
use tracing::debug;

use crate::graph::{SessionBest, WorkoutGraph};
use crate::models::{EntryId, ExerciseDefinitionId, MeasurementTemplate, SetId};

impl WorkoutGraph {
    /// Whether these values would beat the persisted record of the entry's exercise
    #[must_use]
    pub fn evaluate_personal_record(
        &self,
        entry_id: EntryId,
        template: MeasurementTemplate,
        primary: Option<f64>,
        secondary: Option<f64>,
    ) -> bool {
        let Some(entry) = self.entries.get(&entry_id) else {
            return false;
        };
        let Some(score) = self.scoring.score(template, primary, secondary) else {
            return false;
        };
        PrScoringRegistry::qualifies_against(template, score, self.historical_pr(&entry.exercise.id))
    }

    /// Score of a set's actual values under its template
    #[must_use]
    pub fn set_score(&self, set_id: SetId) -> Option<f64> {
        let set = self.sets.get(&set_id)?;
        self.scoring
            .score(set.template, set.actual_primary, set.actual_secondary)
    }

    /// Offer a just-completed, flagged set as the session best of its exercise
    ///
    /// Returns `true` when the set took the record.
    pub(crate) fn offer_session_best(&mut self, set_id: SetId, now: DateTime<Utc>) -> bool {
        let Some(exercise_id) = self.definition_of_set(set_id).cloned() else {
            return false;
        };
        let Some(score) = self.set_score(set_id) else {
            return false;
        };
        let current = self.session_bests.get(&exercise_id).map(|best| best.score);
        if !PrScoringRegistry::is_improvement(score, current) {
            debug!(set = %set_id, score, ?current, "Set did not beat session best");
            return false;
        }
        self.install_session_best(&exercise_id, set_id, score, now);
        true
    }

    /// Drop the record held by `set_id`, if any, and promote a replacement
    pub(crate) fn release_session_best(&mut self, set_id: SetId) {
        if let Some(set) = self.sets.get_mut(&set_id) {
            set.personal_record = false;
        }
        let Some(exercise_id) = self.definition_of_set(set_id).cloned() else {
            return;
        };
        if self
            .session_bests
            .get(&exercise_id)
            .is_some_and(|best| best.set_id == set_id)
        {
            self.session_bests.remove(&exercise_id);
            self.promote_session_best(&exercise_id);
        }
    }

    /// Re-derive records whose set no longer exists or is no longer completed
    pub(crate) fn reconcile_session_bests(&mut self) {
        let stale: Vec<ExerciseDefinitionId> = self
            .session_bests
            .iter()
            .filter(|(exercise_id, best)| {
                !matches!(self.sets.get(&best.set_id), Some(set) if set.completed)
                    || self.definition_of_set(best.set_id) != Some(*exercise_id)
            })
            .map(|(exercise_id, _)| exercise_id.clone())
            .collect();
        for exercise_id in stale {
            if let Some(best) = self.session_bests.remove(&exercise_id) {
                if let Some(set) = self.sets.get_mut(&best.set_id) {
                    set.personal_record = false;
                }
            }
            self.promote_session_best(&exercise_id);
        }
    }

    /// Promote the best completed set of an exercise without a current record
    pub(crate) fn promote_session_best(&mut self, exercise_id: &ExerciseDefinitionId) {
        let mut best: Option<(SetId, f64)> = None;
        for set_id in self.sets_of_definition(exercise_id) {
            let Some(set) = self.sets.get(&set_id) else {
                continue;
            };
            if !set.completed {
                continue;
            }
            let Some(score) = self.set_score(set_id) else {
                continue;
            };
            if PrScoringRegistry::is_improvement(score, best.map(|(_, current)| current)) {
                best = Some((set_id, score));
            }
        }
        let Some((set_id, score)) = best else {
            return;
        };
        let Some(template) = self.sets.get(&set_id).map(|set| set.template) else {
            return;
        };
        if !PrScoringRegistry::qualifies_against(template, score, self.historical_pr(exercise_id)) {
            debug!(exercise = %exercise_id, score, "Replacement does not beat persisted record");
            return;
        }
        let created_at = self
            .sets
            .get(&set_id)
            .and_then(|set| set.completed_at)
            .unwrap_or(self.session.started_at);
        self.install_session_best(exercise_id, set_id, score, created_at);
    }

    fn install_session_best(
        &mut self,
        exercise_id: &ExerciseDefinitionId,
        set_id: SetId,
        score: f64,
        created_at: DateTime<Utc>,
    ) {
        if let Some(previous) = self.session_bests.get(exercise_id) {
            let previous_id = previous.set_id;
            if let Some(set) = self.sets.get_mut(&previous_id) {
                set.personal_record = false;
            }
        }
        let Some(set) = self.sets.get_mut(&set_id) else {
            return;
        };
        set.personal_record = true;
        let best = SessionBest {
            set_id,
            template: set.template,
            primary_value: set.actual_primary,
            secondary_value: set.actual_secondary,
            score,
            created_at,
        };
        debug!(exercise = %exercise_id, set = %set_id, score, "New session best");
        self.session_bests.insert(exercise_id.clone(), best);
    }
}
