// ABOUTME: Set operations: add, delete, type and RPE edits, complete and uncomplete
// ABOUTME: Completion drives session-best tracking and the rest timer policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{CompletionOutcome, SetCompletion};
use crate::graph::{WorkoutGraph, WorkoutSet};
use crate::models::{EntryId, SetId, SetType, ValueField};

const FIELDS: [ValueField; 2] = [ValueField::Primary, ValueField::Secondary];

impl WorkoutGraph {
    /// Append a set to an entry
    ///
    /// Planned values follow the previous set; with no previous plan and no planned range
    /// the most recent historical value is suggested. Ranges, RPE, and tempo are copied
    /// from the previous set. Weight and distance actuals are pre-filled from the last
    /// completed set.
    pub fn add_set(&mut self, entry_id: EntryId) -> Option<SetId> {
        let Some(entry) = self.entries.get(&entry_id) else {
            debug!(entry = %entry_id, "Ignoring set addition to missing entry");
            return None;
        };
        let template_default = entry.exercise.default_template;
        let history = self.previous_sets(&entry.exercise.id).first().cloned();
        let previous = self.sets_for_entry(entry_id).last().cloned();
        let last_completed = self
            .sets_for_entry(entry_id)
            .filter(|s| s.completed)
            .last()
            .cloned();
        let template = previous.as_ref().map_or(template_default, |s| s.template);

        let mut set = WorkoutSet::blank(self.ids.set(), entry_id, 0, template);
        if let Some(previous) = &previous {
            set.planned_primary_range = previous.planned_primary_range;
            set.planned_secondary_range = previous.planned_secondary_range;
            set.planned_rpe = previous.planned_rpe;
            set.tempo.clone_from(&previous.tempo);
        }
        for field in FIELDS {
            let Some(measurement) = template.field_type(field) else {
                continue;
            };
            let has_range = previous
                .as_ref()
                .is_some_and(|s| s.planned_range(field).is_some());
            let planned = previous.as_ref().and_then(|s| s.planned(field)).or_else(|| {
                if has_range {
                    None
                } else {
                    history.as_ref().and_then(|h| h.value(field))
                }
            });
            match field {
                ValueField::Primary => set.planned_primary = planned,
                ValueField::Secondary => set.planned_secondary = planned,
            }
            if measurement.carries_forward() {
                set.set_value(field, last_completed.as_ref().and_then(|s| s.value(field)));
            }
        }

        let set_id = set.id;
        self.append_set(set)?;
        self.refresh_totals();
        self.end_operation();
        Some(set_id)
    }

    /// Remove a set and close the gap in its entry's order
    pub fn delete_set(&mut self, set_id: SetId) -> bool {
        let Some(set) = self.detach_set(set_id) else {
            debug!(set = %set_id, "Ignoring delete of missing set");
            return false;
        };
        self.reindex_sets(set.entry_id);
        self.reconcile_session_bests();
        self.refresh_first_completed_at(set.entry_id);
        self.refresh_totals();
        self.end_operation();
        true
    }

    /// Change the type of a set
    pub fn update_set_type(&mut self, set_id: SetId, set_type: SetType) -> bool {
        let Some(set) = self.sets.get_mut(&set_id) else {
            debug!(set = %set_id, "Ignoring type update of missing set");
            return false;
        };
        set.set_type = set_type;
        set.modified = true;
        self.end_operation();
        true
    }

    /// Change the recorded RPE of a set
    pub fn update_set_rpe(&mut self, set_id: SetId, rpe: Option<f64>) -> bool {
        let Some(set) = self.sets.get_mut(&set_id) else {
            debug!(set = %set_id, "Ignoring RPE update of missing set");
            return false;
        };
        set.actual_rpe = rpe;
        set.modified = true;
        self.refresh_totals();
        self.end_operation();
        true
    }

    /// Mark a set complete
    ///
    /// Completing an already completed set first reverses the earlier completion. A
    /// running rest timer is restarted in place when the completion calls for rest.
    pub fn complete_set(
        &mut self,
        set_id: SetId,
        completion: SetCompletion,
        now: DateTime<Utc>,
    ) -> Option<CompletionOutcome> {
        let Some(set) = self.sets.get(&set_id) else {
            debug!(set = %set_id, "Ignoring completion of missing set");
            return None;
        };
        if set.completed {
            self.reverse_completion(set_id);
        }

        let (entry_id, template, primary, secondary) = {
            let set = self.sets.get_mut(&set_id)?;
            set.actual_primary = completion.primary.or(set.actual_primary);
            set.actual_secondary = completion.secondary.or(set.actual_secondary);
            set.actual_rpe = completion.rpe.or(set.actual_rpe);
            set.completed = true;
            set.completed_at = Some(now);
            (set.entry_id, set.template, set.actual_primary, set.actual_secondary)
        };
        self.refresh_first_completed_at(entry_id);

        let flagged = completion.personal_record.unwrap_or_else(|| {
            self.evaluate_personal_record(entry_id, template, primary, secondary)
        });
        let session_best = flagged && self.offer_session_best(set_id, now);

        let rest = self
            .rest_context(set_id)
            .and_then(|context| context.rest_after_set());
        if let Some(decision) = rest {
            let block_id = self.entries.get(&entry_id).map(|entry| entry.block_id);
            if let Some(block_id) = block_id {
                self.start_rest_timer(block_id, decision, now);
            }
        }

        self.refresh_totals();
        self.end_operation();
        Some(CompletionOutcome {
            rest,
            session_best,
            completed_at: now,
        })
    }

    /// Reverse the completion of a set
    pub fn uncomplete_set(&mut self, set_id: SetId) -> bool {
        if !self.sets.get(&set_id).is_some_and(|set| set.completed) {
            debug!(set = %set_id, "Ignoring uncomplete of missing or open set");
            return false;
        }
        self.reverse_completion(set_id);
        self.refresh_totals();
        self.end_operation();
        true
    }

    fn reverse_completion(&mut self, set_id: SetId) {
        let Some(set) = self.sets.get_mut(&set_id) else {
            return;
        };
        set.completed = false;
        set.completed_at = None;
        let entry_id = set.entry_id;
        self.release_session_best(set_id);
        self.refresh_first_completed_at(entry_id);
    }
}
