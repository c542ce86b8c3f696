//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for the screen layer.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens the store against the process-wide database path, so
//!   screens always observe persisted state.

use mealweek_core::db::open_db;
use mealweek_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    push_unique_label, PlanEntry, SqliteKvRepository, WeekStore,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const WEEK_DB_FILE_NAME: &str = "mealweek.sqlite3";
static WEEK_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One plan cell for screen rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCell {
    /// Meal column label.
    pub meal: String,
    /// Assigned food label, empty when unassigned.
    pub food: String,
}

/// One plan row for screen rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRow {
    /// Day label.
    pub day: String,
    /// Cells in meal display order.
    pub cells: Vec<PlanCell>,
    /// Free-form per-day notes.
    pub notes: String,
}

/// Full store snapshot for screen rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSnapshot {
    /// Whether the snapshot reflects loaded persisted state. Screens render
    /// a loading state while false.
    pub initialized: bool,
    pub days: Vec<String>,
    pub foods: Vec<String>,
    pub meals: Vec<String>,
    pub plan: Vec<PlanRow>,
    /// Human-readable diagnostics message.
    pub message: String,
}

/// Generic action response envelope for mutation calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Reads the full week state for rendering.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures return an uninitialized snapshot with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn week_snapshot() -> WeekSnapshot {
    match with_store(|store| {
        Ok(WeekSnapshot {
            initialized: store.is_initialized(),
            days: store.days().to_vec(),
            foods: store.foods().to_vec(),
            meals: store.meals().to_vec(),
            plan: store.plan().iter().map(to_plan_row).collect(),
            message: String::new(),
        })
    }) {
        Ok(snapshot) => snapshot,
        Err(err) => WeekSnapshot {
            initialized: false,
            days: Vec::new(),
            foods: Vec::new(),
            meals: Vec::new(),
            plan: Vec::new(),
            message: format!("week_snapshot failed: {err}"),
        },
    }
}

/// Replaces the ordered day labels; the plan is reconciled to match.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn update_week_days(days: Vec<String>) -> ActionResponse {
    run_action("update_week_days", |store| store.set_days(days))
}

/// Replaces the ordered food labels.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn update_foods(foods: Vec<String>) -> ActionResponse {
    run_action("update_foods", |store| store.set_foods(foods))
}

/// Replaces the ordered meal labels; the plan is reconciled to match.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn update_meals(meals: Vec<String>) -> ActionResponse {
    run_action("update_meals", |store| store.set_meals(meals))
}

/// Appends a food using the check-before-add convention.
///
/// Blank input and duplicates leave the collection unchanged and report
/// `ok=false` without an error.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn add_food(name: String) -> ActionResponse {
    match with_store(|store| {
        let mut foods = store.foods().to_vec();
        if !push_unique_label(&mut foods, &name) {
            return Ok(false);
        }
        store.set_foods(foods).map_err(|err| err.to_string())?;
        Ok(true)
    }) {
        Ok(true) => ActionResponse::success("Food added."),
        Ok(false) => ActionResponse::failure("Food is blank or already present."),
        Err(err) => ActionResponse::failure(format!("add_food failed: {err}")),
    }
}

/// Assigns a food to one day/meal cell.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; unknown day or meal labels report a failure response.
#[flutter_rust_bridge::frb(sync)]
pub fn assign_food(day: String, meal: String, food: String) -> ActionResponse {
    run_action("assign_food", |store| {
        store.assign_food(&day, &meal, &food)
    })
}

/// Replaces one day's notes.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; unknown day labels report a failure response.
#[flutter_rust_bridge::frb(sync)]
pub fn set_day_notes(day: String, notes: String) -> ActionResponse {
    run_action("set_day_notes", |store| store.set_notes(&day, &notes))
}

/// Pull-to-refresh: re-reads all persisted keys.
///
/// Opening the store already reloads persisted state, so this call reports
/// success once a fresh load settles.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn refresh_week() -> ActionResponse {
    run_action("refresh_week", |store| store.refresh())
}

fn run_action(
    name: &str,
    f: impl FnOnce(&mut WeekStore<SqliteKvRepository<'_>>) -> mealweek_core::StoreResult<()>,
) -> ActionResponse {
    match with_store(|store| f(store).map_err(|err| err.to_string())) {
        Ok(()) => ActionResponse::success("Saved."),
        Err(err) => ActionResponse::failure(format!("{name} failed: {err}")),
    }
}

fn with_store<T>(
    f: impl FnOnce(&mut WeekStore<SqliteKvRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_week_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("week DB open failed: {err}"))?;
    let repo =
        SqliteKvRepository::try_new(&conn).map_err(|err| format!("week repo init failed: {err}"))?;
    let mut store = WeekStore::open(repo).map_err(|err| format!("week store load failed: {err}"))?;
    f(&mut store)
}

fn resolve_week_db_path() -> PathBuf {
    WEEK_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("MEALWEEK_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(WEEK_DB_FILE_NAME)
        })
        .clone()
}

fn to_plan_row(entry: &PlanEntry) -> PlanRow {
    PlanRow {
        day: entry.day.clone(),
        cells: entry
            .slots
            .iter()
            .map(|slot| PlanCell {
                meal: slot.meal.clone(),
                food: slot.food.clone(),
            })
            .collect(),
        notes: entry.notes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{add_food, core_version, init_logging, ping, week_snapshot};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        format!("{prefix}-{}-{nanos}", std::process::id())
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn snapshot_reports_initialized_state() {
        let snapshot = week_snapshot();
        assert!(snapshot.initialized, "{}", snapshot.message);
        assert_eq!(snapshot.plan.len(), snapshot.days.len());
    }

    #[test]
    fn add_food_rejects_duplicates() {
        let name = unique_token("food");

        let first = add_food(name.clone());
        assert!(first.ok, "{}", first.message);

        let second = add_food(name.clone());
        assert!(!second.ok);

        let snapshot = week_snapshot();
        let occurrences = snapshot.foods.iter().filter(|food| **food == name).count();
        assert_eq!(occurrences, 1);
    }
}
