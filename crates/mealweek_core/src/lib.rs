//! Core domain logic for MealWeek.
//! This crate is the single source of truth for week-plan state and its
//! persistence.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::plan::{
    decode_versioned, default_foods, default_meals, default_week_days, encode_versioned,
    push_unique_label, MealSlot, Plan, PlanEntry, SCHEMA_VERSION,
};
pub use model::reconcile::reconcile_plan;
pub use repo::kv_repo::{KvRepository, RepoError, RepoResult, SqliteKvRepository};
pub use store::week_store::{
    PersistStatus, StoreError, StoreResult, WeekStore, KEY_FOODS, KEY_MEALS, KEY_PLAN,
    KEY_WEEK_DAYS,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
