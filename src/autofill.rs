// ABOUTME: Set value edits with auto-fill propagation to later sets of the same exercise
// ABOUTME: Only weight and distance carry forward, and only when the plan leaves them open
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Auto-Fill
//!
//! When a lifter changes the weight of one set, the following sets that still show the
//! old weight almost always change with it. A later set whose value already differs was
//! edited on purpose and is left alone, as are completed sets. Propagation is skipped
//! when the routine prescribes the value: a nonzero planned value on the exercise's
//! first set means every set follows the plan instead.

use tracing::debug;

use crate::graph::WorkoutGraph;
use crate::models::{MeasurementType, SetId, ValueField};

impl WorkoutGraph {
    /// Set an actual value and propagate it to matching later sets
    ///
    /// Returns the number of other sets updated, or `None` if the set does not exist.
    #[allow(clippy::float_cmp)]
    pub fn update_set_value(
        &mut self,
        set_id: SetId,
        field: ValueField,
        value: Option<f64>,
    ) -> Option<usize> {
        let Some(set) = self.sets.get_mut(&set_id) else {
            debug!(set = %set_id, "Ignoring value update of missing set");
            return None;
        };
        let previous = set.value(field);
        set.set_value(field, value);
        set.modified = true;
        let (entry_id, position, template, completed) =
            (set.entry_id, set.order_index, set.template, set.completed);

        let carries_forward = template
            .field_type(field)
            .is_some_and(MeasurementType::carries_forward);
        let planned_on_first = self
            .sets_for_entry(entry_id)
            .next()
            .and_then(|first| first.planned(field))
            .is_some_and(|planned| planned != 0.0);

        let mut propagated = 0;
        if carries_forward && !planned_on_first && previous != value {
            let targets: Vec<SetId> = self
                .sets_for_entry(entry_id)
                .skip(position + 1)
                .filter(|later| !later.completed && later.value(field) == previous)
                .map(|later| later.id)
                .collect();
            for target in targets {
                if let Some(later) = self.sets.get_mut(&target) {
                    later.set_value(field, value);
                    propagated += 1;
                }
            }
        }

        if completed {
            self.rescore_session_best(set_id);
        }
        self.refresh_totals();
        self.end_operation();
        Some(propagated)
    }

    /// Re-derive the session best of a set's exercise after its values changed
    fn rescore_session_best(&mut self, set_id: SetId) {
        let Some(exercise_id) = self.definition_of_set(set_id).cloned() else {
            return;
        };
        if let Some(best) = self.session_bests.remove(&exercise_id) {
            if let Some(set) = self.sets.get_mut(&best.set_id) {
                set.personal_record = false;
            }
            self.promote_session_best(&exercise_id);
        }
    }
}
