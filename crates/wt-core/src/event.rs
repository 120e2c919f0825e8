//! Lifecycle events read from the persisted tracker log.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// Timestamp layout used by tracker log rows (e.g. `1/2/06 15:04`).
///
/// Minute precision, two-digit year. Rows carry no zone; they are taken
/// as UTC.
pub const ROW_TIME_FORMAT: &str = "%m/%d/%y %H:%M";

/// The lifecycle transition a log row records.
///
/// Any string other than the four canonical transitions maps to [`Other`]
/// so that foreign rows (exit markers, notes) flow through reconstruction
/// as label-only events instead of failing the run.
///
/// [`Other`]: EventKind::Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    Pause,
    Resume,
    Stop,
    Other,
}

impl EventKind {
    /// Canonical string representation for storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Pause => "PAUSE",
            Self::Resume => "RESUME",
            Self::Stop => "STOP",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        match s {
            "START" => Self::Start,
            "PAUSE" => Self::Pause,
            "RESUME" => Self::Resume,
            "STOP" => Self::Stop,
            _ => Self::Other,
        }
    }
}

/// A single timestamped row from the tracker log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// When the transition was recorded.
    pub timestamp: DateTime<Utc>,
    /// The transition kind.
    pub kind: EventKind,
    /// Free-text activity label attached to the row.
    pub label: String,
}

/// A log row that could not be turned into an [`Event`].
///
/// Offending rows are skipped with a diagnostic by callers; a bad row
/// never fails the run.
#[derive(Debug, Error)]
pub enum RowError {
    /// The row has fewer than the three expected fields.
    #[error("row has {got} fields, expected at least 3")]
    TooFewFields { got: usize },

    /// The timestamp field does not match [`ROW_TIME_FORMAT`].
    #[error("invalid timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl Event {
    /// Parses a `[timestamp, kind, label]` row from the tracker log.
    ///
    /// Fields beyond the third are ignored. All fields are trimmed before
    /// interpretation, matching how rows come back from the store.
    pub fn from_row(row: &[&str]) -> Result<Self, RowError> {
        if row.len() < 3 {
            return Err(RowError::TooFewFields { got: row.len() });
        }

        let raw_timestamp = row[0].trim();
        let timestamp = NaiveDateTime::parse_from_str(raw_timestamp, ROW_TIME_FORMAT)
            .map_err(|source| RowError::Timestamp {
                value: raw_timestamp.to_string(),
                source,
            })?
            .and_utc();

        Ok(Self {
            timestamp,
            kind: EventKind::from(row[1].trim()),
            label: row[2].trim().to_string(),
        })
    }
}
