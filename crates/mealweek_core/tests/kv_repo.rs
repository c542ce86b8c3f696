use mealweek_core::db::open_db_in_memory;
use mealweek_core::{KvRepository, RepoError, SqliteKvRepository};
use rusqlite::Connection;

#[test]
fn read_missing_key_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();

    assert_eq!(repo.read_text("weekDays").unwrap(), None);
}

#[test]
fn write_then_read_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();

    repo.write_text("foods", "[\"Eggs\"]").unwrap();
    assert_eq!(repo.read_text("foods").unwrap().as_deref(), Some("[\"Eggs\"]"));
}

#[test]
fn write_replaces_existing_value() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();

    repo.write_text("meals", "first").unwrap();
    repo.write_text("meals", "second").unwrap();

    assert_eq!(repo.read_text("meals").unwrap().as_deref(), Some("second"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteKvRepository::try_new(&conn).unwrap_err();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}
