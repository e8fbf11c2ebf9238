//! Event repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Map a date key to its ordered list of event lines.
//! - Own the SQLite connection for the lifetime of the store.
//!
//! # Invariants
//! - Lookups match `events.date` by exact `DateKey` text.
//! - `replace_events` deletes and re-inserts inside one immediate
//!   transaction; readers see either the old or the new line set.
//! - Stored lines are trimmed and never empty.

use crate::db::migrations::apply_migrations;
use crate::db::DbError;
use crate::model::date_key::DateKey;
use crate::model::event::EventRecord;
use log::{debug, info};
use rusqlite::{params, Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for event persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection was handed over before the schema was created.
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => write!(f, "required table missing: {table}"),
            Self::InvalidData(message) => write!(f, "invalid persisted event data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Date-keyed event line storage.
pub trait EventRepository {
    /// Creates the backing table when absent. Idempotent.
    fn init(&mut self) -> RepoResult<()>;
    /// Returns whether at least one line is stored for `date`.
    fn has_events(&self, date: &DateKey) -> RepoResult<bool>;
    /// Returns all lines for `date` in insertion order.
    fn list_events(&self, date: &DateKey) -> RepoResult<Vec<String>>;
    /// Replaces every line for `date`; blank lines are dropped, others trimmed.
    ///
    /// Returns the lines actually stored, in order.
    fn replace_events(&mut self, date: &DateKey, lines: &[String]) -> RepoResult<Vec<String>>;
}

/// SQLite-backed event repository.
///
/// Holds the process-wide connection; dropping the repository closes it.
pub struct SqliteEventRepository {
    conn: Connection,
}

impl SqliteEventRepository {
    /// Takes ownership of a migrated connection.
    ///
    /// Fails when the `events` table is missing, i.e. the connection did not
    /// come from `open_db`/`open_db_in_memory` and `init` was never run.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self { conn })
    }

    /// Takes ownership of any connection and creates the schema on it.
    pub fn with_init(conn: Connection) -> RepoResult<Self> {
        let mut repo = Self { conn };
        repo.init()?;
        Ok(repo)
    }

    /// Returns stored rows for `date`, including surrogate ids.
    pub fn list_records(&self, date: &DateKey) -> RepoResult<Vec<EventRecord>> {
        let key = date.to_string();
        let mut stmt = self.conn.prepare(
            "SELECT id, date, description
             FROM events
             WHERE date = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([key.as_str()])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let date_text: String = row.get("date")?;
            let parsed = date_text.parse::<DateKey>().map_err(|err| {
                RepoError::InvalidData(format!("events.date `{date_text}`: {err}"))
            })?;
            records.push(EventRecord {
                id: row.get("id")?,
                date: parsed,
                text: row.get("description")?,
            });
        }
        Ok(records)
    }
}

impl EventRepository for SqliteEventRepository {
    fn init(&mut self) -> RepoResult<()> {
        apply_migrations(&mut self.conn)?;
        ensure_connection_ready(&self.conn)
    }

    fn has_events(&self, date: &DateKey) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM events
                WHERE date = ?1
            );",
            [date.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn list_events(&self, date: &DateKey) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT description
             FROM events
             WHERE date = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([date.to_string()])?;
        let mut lines = Vec::new();
        while let Some(row) = rows.next()? {
            lines.push(row.get(0)?);
        }
        Ok(lines)
    }

    fn replace_events(&mut self, date: &DateKey, lines: &[String]) -> RepoResult<Vec<String>> {
        let key = date.to_string();
        let normalized = normalize_lines(lines);

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed = tx.execute("DELETE FROM events WHERE date = ?1;", [key.as_str()])?;
        for line in &normalized {
            tx.execute(
                "INSERT INTO events (date, description) VALUES (?1, ?2);",
                params![key.as_str(), line],
            )?;
        }
        // An early return drops `tx`, which rolls it back.
        tx.commit()?;

        debug!(
            "event=events_replace module=repo status=ok date={} removed={} inserted={}",
            key,
            removed,
            normalized.len()
        );
        Ok(normalized)
    }
}

/// Trims each line and drops the ones left empty.
pub fn normalize_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'events'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable("events"));
    }

    info!("event=store_ready module=repo status=ok table=events");
    Ok(())
}
