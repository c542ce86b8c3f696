use mealweek_core::db::open_db_in_memory;
use mealweek_core::{
    KvRepository, PersistStatus, RepoResult, SqliteKvRepository, StoreError, WeekStore,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

fn seeded_store() -> WeekStore<impl KvRepository> {
    let conn = open_db_in_memory().unwrap();
    let repo = OwnedSqliteRepo { conn };
    let mut store = WeekStore::open(repo).unwrap();
    store.set_days(labels(&["Mon", "Tue"])).unwrap();
    store.set_meals(labels(&["Breakfast", "Lunch"])).unwrap();
    store.assign_food("Mon", "Breakfast", "Eggs").unwrap();
    store.assign_food("Tue", "Lunch", "Fish").unwrap();
    store.set_notes("Mon", "prep").unwrap();
    store
}

// Owns its connection so the store can be returned from a helper.
struct OwnedSqliteRepo {
    conn: rusqlite::Connection,
}

impl KvRepository for OwnedSqliteRepo {
    fn read_text(&self, key: &str) -> RepoResult<Option<String>> {
        SqliteKvRepository::try_new(&self.conn)?.read_text(key)
    }

    fn write_text(&self, key: &str, value: &str) -> RepoResult<()> {
        SqliteKvRepository::try_new(&self.conn)?.write_text(key, value)
    }
}

#[test]
fn adding_a_meal_keeps_existing_cells_and_notes() {
    let mut store = seeded_store();

    store
        .set_meals(labels(&["Breakfast", "Lunch", "Dinner"]))
        .unwrap();

    let monday = &store.plan()[0];
    assert_eq!(monday.food_for("Breakfast"), Some("Eggs"));
    assert_eq!(monday.food_for("Dinner"), Some(""));
    assert_eq!(monday.notes, "prep");
}

#[test]
fn clearing_days_empties_the_plan() {
    let mut store = seeded_store();

    store.set_days(Vec::new()).unwrap();
    assert!(store.plan().is_empty());
}

#[test]
fn clearing_meals_keeps_rows_with_notes_only() {
    let mut store = seeded_store();

    store.set_meals(Vec::new()).unwrap();

    assert_eq!(store.plan().len(), 2);
    let monday = &store.plan()[0];
    assert!(monday.slots.is_empty());
    assert_eq!(monday.notes, "prep");
}

#[test]
fn reordering_days_reorders_rows_with_values_intact() {
    let mut store = seeded_store();

    store.set_days(labels(&["Tue", "Mon"])).unwrap();

    assert_eq!(store.plan()[0].day, "Tue");
    assert_eq!(store.plan()[0].food_for("Lunch"), Some("Fish"));
    assert_eq!(store.plan()[1].day, "Mon");
    assert_eq!(store.plan()[1].food_for("Breakfast"), Some("Eggs"));
    assert_eq!(store.plan()[1].notes, "prep");
}

#[test]
fn renaming_a_day_drops_its_data() {
    let mut store = seeded_store();

    store.set_days(labels(&["Monday", "Tue"])).unwrap();

    let renamed = &store.plan()[0];
    assert_eq!(renamed.day, "Monday");
    assert_eq!(renamed.food_for("Breakfast"), Some(""));
    assert!(renamed.notes.is_empty());
}

// In-memory repository whose writes can be made to fail, for exercising
// the dirty-persistence contract.
#[derive(Default)]
struct FlakyRepo {
    entries: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl KvRepository for FlakyRepo {
    fn read_text(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write_text(&self, key: &str, value: &str) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(rusqlite::Error::InvalidQuery.into());
        }
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[test]
fn failed_write_keeps_memory_and_reports_dirty_until_next_success() {
    let repo = FlakyRepo::default();
    let mut store = WeekStore::open(&repo).unwrap();
    assert_eq!(store.persistence(), PersistStatus::Synced);

    repo.fail_writes.set(true);
    let err = store.set_foods(labels(&["Eggs"])).unwrap_err();
    assert!(matches!(err, StoreError::Repo(_)));

    // The in-memory mutation sticks, storage is behind.
    assert_eq!(store.foods(), labels(&["Eggs"]));
    assert_eq!(store.persistence(), PersistStatus::Dirty);

    repo.fail_writes.set(false);
    store.set_foods(labels(&["Eggs", "Soup"])).unwrap();
    assert_eq!(store.persistence(), PersistStatus::Synced);
}
