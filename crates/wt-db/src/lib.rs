//! Storage layer for the work tracker.
//!
//! A single append-only `events` table over `rusqlite`. Each row is one
//! lifecycle event: a timestamp, a kind string, and a free-text label.
//!
//! # Timestamp Format
//!
//! Timestamps are stored as TEXT in RFC 3339 form (e.g.
//! `2024-01-15T10:30:00Z`), always UTC, so lexicographic ordering matches
//! chronological ordering. Interpretation of the kind string is left to
//! the core crate; the store round-trips rows verbatim.
//!
//! # Thread Safety
//!
//! [`Database`] wraps a `rusqlite::Connection`, which is `Send` but not
//! `Sync`; wrap it in a `Mutex` or use one instance per thread for
//! concurrent access.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, params};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// One stored event row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// RFC 3339 timestamp.
    pub timestamp: String,
    /// Event kind string (`START`, `PAUSE`, `RESUME`, `STOP`, or other).
    pub kind: String,
    /// Free-text activity label.
    pub label: String,
}

/// Formats a timestamp the way the store expects it.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The schema is initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection
    /// closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the schema. Idempotent.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                kind TEXT NOT NULL,
                label TEXT NOT NULL DEFAULT ''
            );

            CREATE INDEX IF NOT EXISTS idx_events_timestamp ON events(timestamp);
            ",
        )?;
        Ok(())
    }

    /// Appends a single event.
    pub fn append_event(&mut self, record: &EventRecord) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO events (timestamp, kind, label) VALUES (?, ?, ?)",
            params![record.timestamp, record.kind, record.label],
        )?;
        Ok(())
    }

    /// Appends a batch of events in one transaction.
    pub fn append_events(&mut self, records: &[EventRecord]) -> Result<usize, DbError> {
        if records.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO events (timestamp, kind, label) VALUES (?, ?, ?)")?;
            for record in records {
                stmt.execute(params![record.timestamp, record.kind, record.label])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Lists all events ordered by timestamp, then append order.
    pub fn list_events(&self) -> Result<Vec<EventRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT timestamp, kind, label
            FROM events
            ORDER BY timestamp ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(EventRecord {
                timestamp: row.get(0)?,
                kind: row.get(1)?,
                label: row.get(2)?,
            })
        })?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?);
        }
        Ok(events)
    }

    /// Total number of stored events.
    pub fn event_count(&self) -> Result<u64, DbError> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        Ok(count)
    }

    /// The most recently appended event, if any.
    pub fn last_event(&self) -> Result<Option<EventRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT timestamp, kind, label
            FROM events
            ORDER BY timestamp DESC, id DESC
            LIMIT 1
            ",
        )?;
        let mut rows = stmt.query_map([], |row| {
            Ok(EventRecord {
                timestamp: row.get(0)?,
                kind: row.get(1)?,
                label: row.get(2)?,
            })
        })?;
        rows.next().transpose().map_err(DbError::from)
    }
}
