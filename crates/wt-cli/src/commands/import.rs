//! Import command for rows exported from the old spreadsheet log.
//!
//! Input is JSON Lines, one row per line, carrying the original log's
//! three columns: `{"timestamp": "1/2/06 15:04", "event": "START",
//! "name": "..."}`. Timestamps are normalized to RFC 3339 on the way in.

use std::io::BufRead;

use anyhow::{Context, Result};
use serde::Deserialize;

use wt_core::Event;
use wt_db::{Database, EventRecord, format_timestamp};

/// Outcome of an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// One exported row.
#[derive(Debug, Deserialize)]
struct ImportRow {
    timestamp: String,
    event: String,
    #[serde(default)]
    name: String,
}

/// Reads JSON Lines rows and appends them to the store.
///
/// Rows that are not valid JSON or whose timestamp does not match the
/// log's minute-precision layout are skipped with a warning; a bad row
/// never aborts the import.
pub fn run<R: BufRead>(reader: R, db: &mut Database) -> Result<ImportSummary> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let row: ImportRow = match serde_json::from_str(trimmed) {
            Ok(row) => row,
            Err(error) => {
                tracing::warn!(line = idx + 1, %error, "skipping invalid row");
                skipped += 1;
                continue;
            }
        };

        match Event::from_row(&[row.timestamp.as_str(), row.event.as_str(), row.name.as_str()]) {
            Ok(event) => records.push(EventRecord {
                timestamp: format_timestamp(event.timestamp),
                // Keep the raw kind string so foreign markers survive verbatim.
                kind: row.event.trim().to_string(),
                label: event.label,
            }),
            Err(error) => {
                tracing::warn!(line = idx + 1, %error, "skipping invalid row");
                skipped += 1;
            }
        }
    }

    let imported = db.append_events(&records)?;
    Ok(ImportSummary { imported, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    #[test]
    fn imports_rows_and_normalizes_timestamps() {
        let input = concat!(
            r#"{"timestamp": "1/2/06 15:04", "event": "START", "name": "alpha"}"#,
            "\n",
            r#"{"timestamp": "1/2/06 16:04", "event": "STOP", "name": ""}"#,
            "\n",
        );
        let mut db = Database::open_in_memory().unwrap();
        let summary = run(Cursor::new(input), &mut db).unwrap();

        assert_eq!(summary, ImportSummary { imported: 2, skipped: 0 });
        let events = db.list_events().unwrap();
        assert_eq!(events[0].timestamp, "2006-01-02T15:04:00Z");
        assert_eq!(events[0].kind, "START");
        assert_eq!(events[0].label, "alpha");
    }

    #[test]
    fn bad_rows_are_skipped_not_fatal() {
        let input = concat!(
            r#"{"timestamp": "1/2/06 15:04", "event": "START", "name": "good"}"#,
            "\n",
            "not json at all\n",
            r#"{"timestamp": "2006-01-02 16:00", "event": "STOP", "name": "bad time"}"#,
            "\n",
        );
        let mut db = Database::open_in_memory().unwrap();
        let summary = run(Cursor::new(input), &mut db).unwrap();

        assert_eq!(summary, ImportSummary { imported: 1, skipped: 2 });
        assert_eq!(db.event_count().unwrap(), 1);
    }

    #[test]
    fn missing_name_defaults_to_empty() {
        let input = r#"{"timestamp": "1/2/06 15:04", "event": "EXIT"}"#;
        let mut db = Database::open_in_memory().unwrap();
        let summary = run(Cursor::new(input), &mut db).unwrap();

        assert_eq!(summary.imported, 1);
        let events = db.list_events().unwrap();
        assert_eq!(events[0].kind, "EXIT");
        assert_eq!(events[0].label, "");
    }

    #[test]
    fn blank_lines_are_ignored() {
        let input = "\n\n";
        let mut db = Database::open_in_memory().unwrap();
        let summary = run(Cursor::new(input), &mut db).unwrap();

        assert_eq!(summary, ImportSummary { imported: 0, skipped: 0 });
    }
}
