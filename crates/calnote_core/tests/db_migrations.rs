use calnote_core::db::migrations::latest_version;
use calnote_core::db::{open_db, open_db_in_memory, DbError};
use calnote_core::{DateKey, EventRepository, SqliteEventRepository};
use rusqlite::Connection;
use std::error::Error;

#[test]
fn open_db_in_memory_creates_events_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "events");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar.db");

    let mut repo = SqliteEventRepository::try_new(open_db(&path).unwrap()).unwrap();
    let date: DateKey = "2024-3-7".parse().unwrap();
    repo.replace_events(&date, &["standup".to_string()]).unwrap();
    repo.init().unwrap();
    drop(repo);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let repo = SqliteEventRepository::try_new(conn).unwrap();
    assert_eq!(repo.list_events(&date).unwrap(), vec!["standup"]);
}

#[test]
fn legacy_unversioned_database_is_adopted_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar.db");

    let legacy = Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                description TEXT NOT NULL
            );
            INSERT INTO events (date, description) VALUES ('2023-12-25', 'dinner');
            INSERT INTO events (date, description) VALUES ('2023-12-25', 'gifts');",
        )
        .unwrap();
    drop(legacy);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let repo = SqliteEventRepository::try_new(conn).unwrap();
    let christmas: DateKey = "2023-12-25".parse().unwrap();
    assert_eq!(
        repo.list_events(&christmas).unwrap(),
        vec!["dinner", "gifts"]
    );
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_database_in_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("calendar.db");

    let err = match open_db(&path) {
        Err(err) => err,
        Ok(_) => panic!("opening under a missing directory should fail"),
    };
    assert!(matches!(&err, DbError::Open { path: failed, .. } if *failed == path));

    // The sqlite cause is only reachable through `source()`, so chained
    // error output names it once.
    let cause = err.source().unwrap().to_string();
    assert!(!err.to_string().contains(&cause));
    assert_eq!(
        err.to_string(),
        format!("cannot open event database `{}`", path.display())
    );
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
