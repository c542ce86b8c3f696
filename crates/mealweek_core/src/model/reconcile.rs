//! Plan reconciliation.
//!
//! # Responsibility
//! - Re-derive the plan grid whenever the days or meals collections change.
//! - Carry existing cell values and notes across the rebuild by label match.
//!
//! # Invariants
//! - Output has exactly one entry per day, in day order.
//! - Every entry's slot list equals the meals collection, in meal order.
//! - Matching is by value, never by position: reordering days or meals
//!   loses no data, while renaming is delete-plus-add and does.

use crate::model::plan::{MealSlot, Plan, PlanEntry};

/// Rebuilds the plan for the given days and meals, carrying over matching
/// values from `previous`.
///
/// Entries for days no longer present and slots for meals no longer present
/// are dropped. A day or meal with no previous match starts empty.
pub fn reconcile_plan(days: &[String], meals: &[String], previous: &[PlanEntry]) -> Plan {
    days.iter()
        .map(|day| {
            let prior = previous.iter().find(|entry| &entry.day == day);
            PlanEntry {
                day: day.clone(),
                slots: meals
                    .iter()
                    .map(|meal| MealSlot {
                        meal: meal.clone(),
                        food: prior
                            .and_then(|entry| entry.food_for(meal))
                            .map(str::to_owned)
                            .unwrap_or_default(),
                    })
                    .collect(),
                notes: prior.map(|entry| entry.notes.clone()).unwrap_or_default(),
            }
        })
        .collect()
}
