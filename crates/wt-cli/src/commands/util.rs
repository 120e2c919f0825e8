//! Shared helpers for commands that read the event store.

use anyhow::Result;
use chrono::{DateTime, Utc};

use wt_core::{Event, EventKind};
use wt_db::{Database, EventRecord};

/// Converts a stored record into a typed core event.
fn parse_record(record: &EventRecord) -> Result<Event, chrono::ParseError> {
    let timestamp = DateTime::parse_from_rfc3339(&record.timestamp)?.with_timezone(&Utc);
    Ok(Event {
        timestamp,
        kind: EventKind::from(record.kind.as_str()),
        label: record.label.clone(),
    })
}

/// Loads every stored event as a typed core event.
///
/// Rows whose timestamp does not parse are skipped with a warning; a bad
/// row never fails the run.
pub fn load_events(db: &Database) -> Result<Vec<Event>> {
    let records = db.list_events()?;
    let mut events = Vec::with_capacity(records.len());
    for record in &records {
        match parse_record(record) {
            Ok(event) => events.push(event),
            Err(error) => {
                tracing::warn!(%error, timestamp = %record.timestamp, "skipping unparsable event row");
            }
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: &str, kind: &str, label: &str) -> EventRecord {
        EventRecord {
            timestamp: timestamp.to_string(),
            kind: kind.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn load_events_converts_records() {
        let mut db = Database::open_in_memory().unwrap();
        db.append_event(&record("2024-03-20T09:00:00Z", "START", "alpha"))
            .unwrap();

        let events = load_events(&db).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Start);
        assert_eq!(events[0].label, "alpha");
    }

    #[test]
    fn load_events_skips_bad_timestamps() {
        let mut db = Database::open_in_memory().unwrap();
        db.append_events(&[
            record("not a timestamp", "START", "bad"),
            record("2024-03-20T09:00:00Z", "START", "good"),
        ])
        .unwrap();

        let events = load_events(&db).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].label, "good");
    }

    #[test]
    fn load_events_maps_foreign_kinds_to_other() {
        let mut db = Database::open_in_memory().unwrap();
        db.append_event(&record("2024-03-20T09:00:00Z", "EXIT", ""))
            .unwrap();

        let events = load_events(&db).unwrap();
        assert_eq!(events[0].kind, EventKind::Other);
    }
}
