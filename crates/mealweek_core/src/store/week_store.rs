//! Week store: source of truth for days, foods, meals and the plan.
//!
//! # Responsibility
//! - Load the four persisted collections at startup, with per-key defaults.
//! - Apply mutations in memory and write them through to storage.
//! - Trigger plan reconciliation whenever days or meals are replaced.
//!
//! # Invariants
//! - The plan always has one entry per day and one slot per meal, in order.
//! - In-memory mutation applies even when the storage write fails; the
//!   failure is returned and `persistence()` reports `Dirty` until a later
//!   write succeeds.
//! - `is_initialized()` becomes true after the first successful `load` and
//!   never reverts for the store's lifetime.
//!
//! The store does not validate labels. Duplicate or blank entries are the
//! caller's concern; UI callers follow the check-before-add convention
//! (`model::plan::push_unique_label`).

use crate::model::plan::{
    decode_versioned, default_foods, default_meals, default_week_days, encode_versioned, Plan,
    PlanEntry,
};
use crate::model::reconcile::reconcile_plan;
use crate::repo::kv_repo::{KvRepository, RepoError};
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Persisted key holding the ordered day labels.
pub const KEY_WEEK_DAYS: &str = "weekDays";
/// Persisted key holding the ordered food labels.
pub const KEY_FOODS: &str = "foods";
/// Persisted key holding the ordered meal labels.
pub const KEY_MEALS: &str = "meals";
/// Persisted key holding the plan grid.
pub const KEY_PLAN: &str = "plan";

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from week store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Mutator or refresh called before `load` completed.
    NotInitialized,
    /// Target day label does not exist in the plan.
    UnknownDay(String),
    /// Target meal label does not exist in the plan row.
    UnknownMeal(String),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Payload could not be encoded to JSON.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "week store is not initialized; call load first"),
            Self::UnknownDay(day) => write!(f, "unknown day: `{day}`"),
            Self::UnknownMeal(meal) => write!(f, "unknown meal: `{meal}`"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode payload: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotInitialized => None,
            Self::UnknownDay(_) => None,
            Self::UnknownMeal(_) => None,
            Self::Repo(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Whether in-memory state matches the last storage write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStatus {
    /// The last write round settled in storage.
    Synced,
    /// A storage write failed; memory is ahead of disk until a later write
    /// succeeds or the store is reloaded.
    Dirty,
}

/// Source of truth for the week plan and its supporting collections.
///
/// Constructed explicitly and handed to its consumers; there is no ambient
/// process-wide instance.
pub struct WeekStore<R: KvRepository> {
    repo: R,
    days: Vec<String>,
    foods: Vec<String>,
    meals: Vec<String>,
    plan: Plan,
    initialized: bool,
    persistence: PersistStatus,
}

impl<R: KvRepository> WeekStore<R> {
    /// Creates an uninitialized store holding the hard-coded defaults.
    ///
    /// Consumers must treat reads as not-yet-valid until `load` succeeds.
    pub fn new(repo: R) -> Self {
        let days = default_week_days();
        let meals = default_meals();
        let plan = reconcile_plan(&days, &meals, &[]);
        Self {
            repo,
            days,
            foods: default_foods(),
            meals,
            plan,
            initialized: false,
            persistence: PersistStatus::Synced,
        }
    }

    /// Creates a store and immediately loads persisted state.
    pub fn open(repo: R) -> StoreResult<Self> {
        let mut store = Self::new(repo);
        store.load()?;
        Ok(store)
    }

    /// Reads all four keys from storage and replaces in-memory state.
    ///
    /// A missing or undecodable value falls back to the hard-coded default
    /// for that key only. A missing plan is derived from the loaded days and
    /// meals. Storage read failures abort the load and leave the store
    /// uninitialized.
    pub fn load(&mut self) -> StoreResult<()> {
        self.days = self
            .read_decoded(KEY_WEEK_DAYS)?
            .unwrap_or_else(default_week_days);
        self.foods = self.read_decoded(KEY_FOODS)?.unwrap_or_else(default_foods);
        self.meals = self.read_decoded(KEY_MEALS)?.unwrap_or_else(default_meals);
        self.plan = match self.read_decoded::<Plan>(KEY_PLAN)? {
            Some(plan) => plan,
            None => reconcile_plan(&self.days, &self.meals, &[]),
        };

        self.initialized = true;
        self.persistence = PersistStatus::Synced;
        info!(
            "event=store_load module=store status=ok days={} foods={} meals={}",
            self.days.len(),
            self.foods.len(),
            self.meals.len()
        );
        Ok(())
    }

    /// False until the initial `load` completes; never reverts afterwards.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the last storage write settled.
    pub fn persistence(&self) -> PersistStatus {
        self.persistence
    }

    /// Ordered day labels.
    pub fn days(&self) -> &[String] {
        &self.days
    }

    /// Ordered food labels.
    pub fn foods(&self) -> &[String] {
        &self.foods
    }

    /// Ordered meal labels.
    pub fn meals(&self) -> &[String] {
        &self.meals
    }

    /// Plan rows, one per day, in day order.
    pub fn plan(&self) -> &[PlanEntry] {
        &self.plan
    }

    /// Replaces the days collection, reconciles the plan and persists both.
    pub fn set_days(&mut self, days: Vec<String>) -> StoreResult<()> {
        self.ensure_initialized()?;
        self.days = days;
        self.plan = reconcile_plan(&self.days, &self.meals, &self.plan);
        let days_payload = encode_versioned(&self.days)?;
        let plan_payload = encode_versioned(&self.plan)?;
        self.persist_key(KEY_WEEK_DAYS, &days_payload)?;
        self.persist_key(KEY_PLAN, &plan_payload)
    }

    /// Replaces the foods collection and persists it.
    ///
    /// Foods do not shape the plan, so no reconciliation happens here.
    pub fn set_foods(&mut self, foods: Vec<String>) -> StoreResult<()> {
        self.ensure_initialized()?;
        self.foods = foods;
        let payload = encode_versioned(&self.foods)?;
        self.persist_key(KEY_FOODS, &payload)
    }

    /// Replaces the meals collection, reconciles the plan and persists both.
    pub fn set_meals(&mut self, meals: Vec<String>) -> StoreResult<()> {
        self.ensure_initialized()?;
        self.meals = meals;
        self.plan = reconcile_plan(&self.days, &self.meals, &self.plan);
        let meals_payload = encode_versioned(&self.meals)?;
        let plan_payload = encode_versioned(&self.plan)?;
        self.persist_key(KEY_MEALS, &meals_payload)?;
        self.persist_key(KEY_PLAN, &plan_payload)
    }

    /// Replaces the plan wholesale and persists it.
    ///
    /// Shape invariants are the caller's responsibility on this path;
    /// typical callers copy the current plan and change one field of one
    /// entry, or use `assign_food` / `set_notes` instead.
    pub fn set_plan(&mut self, plan: Plan) -> StoreResult<()> {
        self.ensure_initialized()?;
        self.plan = plan;
        let payload = encode_versioned(&self.plan)?;
        self.persist_key(KEY_PLAN, &payload)
    }

    /// Assigns `food` to one day/meal cell and persists the plan.
    pub fn assign_food(&mut self, day: &str, meal: &str, food: &str) -> StoreResult<()> {
        self.ensure_initialized()?;
        let entry = self
            .plan
            .iter_mut()
            .find(|entry| entry.day == day)
            .ok_or_else(|| StoreError::UnknownDay(day.to_owned()))?;
        if !entry.set_food(meal, food) {
            return Err(StoreError::UnknownMeal(meal.to_owned()));
        }
        let payload = encode_versioned(&self.plan)?;
        self.persist_key(KEY_PLAN, &payload)
    }

    /// Replaces one day's notes and persists the plan.
    pub fn set_notes(&mut self, day: &str, notes: &str) -> StoreResult<()> {
        self.ensure_initialized()?;
        let entry = self
            .plan
            .iter_mut()
            .find(|entry| entry.day == day)
            .ok_or_else(|| StoreError::UnknownDay(day.to_owned()))?;
        entry.notes = notes.to_owned();
        let payload = encode_versioned(&self.plan)?;
        self.persist_key(KEY_PLAN, &payload)
    }

    /// Re-reads all four keys and overwrites in-memory state.
    ///
    /// Pull-to-refresh semantics: a key that is missing or undecodable
    /// leaves the current in-memory value in place. Unpersisted in-memory
    /// changes are overwritten by whatever storage holds.
    pub fn refresh(&mut self) -> StoreResult<()> {
        self.ensure_initialized()?;
        if let Some(days) = self.read_decoded(KEY_WEEK_DAYS)? {
            self.days = days;
        }
        if let Some(foods) = self.read_decoded(KEY_FOODS)? {
            self.foods = foods;
        }
        if let Some(meals) = self.read_decoded(KEY_MEALS)? {
            self.meals = meals;
        }
        if let Some(plan) = self.read_decoded::<Plan>(KEY_PLAN)? {
            self.plan = plan;
        }
        self.persistence = PersistStatus::Synced;
        Ok(())
    }

    fn ensure_initialized(&self) -> StoreResult<()> {
        if !self.initialized {
            return Err(StoreError::NotInitialized);
        }
        Ok(())
    }

    fn read_decoded<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(raw) = self.repo.read_text(key)? else {
            return Ok(None);
        };
        match decode_versioned(&raw) {
            Some(value) => Ok(Some(value)),
            None => {
                warn!("event=kv_decode_fallback module=store status=warn key={key}");
                Ok(None)
            }
        }
    }

    fn persist_key(&mut self, key: &str, payload: &str) -> StoreResult<()> {
        match self.repo.write_text(key, payload) {
            Ok(()) => {
                self.persistence = PersistStatus::Synced;
                Ok(())
            }
            Err(err) => {
                self.persistence = PersistStatus::Dirty;
                error!("event=kv_write module=store status=error key={key} error={err}");
                Err(err.into())
            }
        }
    }
}
