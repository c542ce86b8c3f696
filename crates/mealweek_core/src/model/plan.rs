//! Plan grid model and persisted-value envelope.
//!
//! # Responsibility
//! - Define `MealSlot`, `PlanEntry` and the `Plan` row sequence.
//! - Provide the versioned JSON envelope used for every persisted key.
//! - Hold the hard-coded defaults used when storage is empty or corrupt.
//!
//! # Invariants
//! - Days, foods and meals are plain labels; uniqueness and ordering are
//!   properties of the containing collection, not of the value type.
//! - An empty `food` string means the cell is unassigned.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Current payload schema for all persisted keys.
pub const SCHEMA_VERSION: u32 = 1;

/// One cell of a plan row: a meal column and its assigned food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSlot {
    /// Meal label, matching an entry of the meals collection.
    pub meal: String,
    /// Assigned food label, or empty when unassigned.
    pub food: String,
}

impl MealSlot {
    pub fn empty(meal: impl Into<String>) -> Self {
        Self {
            meal: meal.into(),
            food: String::new(),
        }
    }
}

/// One row of the plan: a day, its meal cells in column order, and notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Day label, matching an entry of the days collection.
    pub day: String,
    /// Meal cells in meal display order.
    pub slots: Vec<MealSlot>,
    /// Free-form per-day notes.
    pub notes: String,
}

impl PlanEntry {
    /// Returns the assigned food for `meal`, when the entry has that column.
    pub fn food_for(&self, meal: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|slot| slot.meal == meal)
            .map(|slot| slot.food.as_str())
    }

    /// Assigns `food` to the `meal` column. Returns `false` when the entry
    /// has no such column.
    pub fn set_food(&mut self, meal: &str, food: impl Into<String>) -> bool {
        match self.slots.iter_mut().find(|slot| slot.meal == meal) {
            Some(slot) => {
                slot.food = food.into();
                true
            }
            None => false,
        }
    }
}

/// Ordered plan rows, one per day.
pub type Plan = Vec<PlanEntry>;

/// Versioned envelope wrapping every persisted JSON payload.
///
/// Decode failure or a schema mismatch is handled by the caller as
/// fall-back-to-default for that key only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub schema: u32,
    pub data: T,
}

/// Encodes a payload into its persisted envelope text.
pub fn encode_versioned<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Versioned {
        schema: SCHEMA_VERSION,
        data,
    })
}

/// Decodes persisted envelope text back into a payload.
///
/// Returns `None` for malformed JSON or an unknown schema version; callers
/// substitute the hard-coded default for the affected key.
pub fn decode_versioned<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let envelope = serde_json::from_str::<Versioned<T>>(raw).ok()?;
    if envelope.schema != SCHEMA_VERSION {
        return None;
    }
    Some(envelope.data)
}

/// Default day labels used when storage has no `weekDays` value.
pub fn default_week_days() -> Vec<String> {
    [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ]
    .map(str::to_owned)
    .to_vec()
}

/// Default food labels used when storage has no `foods` value.
pub fn default_foods() -> Vec<String> {
    ["Eggs", "Pasta", "Salad", "Chicken", "Soup", "Rice", "Fish"]
        .map(str::to_owned)
        .to_vec()
}

/// Default meal labels used when storage has no `meals` value.
pub fn default_meals() -> Vec<String> {
    ["Breakfast", "Lunch", "Dinner"].map(str::to_owned).to_vec()
}

/// Appends a label after trimming, skipping blank input and duplicates.
///
/// This is the check-before-add convention UI callers follow; the store
/// itself does not validate labels.
pub fn push_unique_label(labels: &mut Vec<String>, raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() || labels.iter().any(|label| label == trimmed) {
        return false;
    }
    labels.push(trimmed.to_owned());
    true
}
