//! Status command showing the store and the live tracker state.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};

use wt_core::fold_events;
use wt_db::Database;

use super::util::load_events;

#[allow(clippy::cast_precision_loss)]
fn hours(duration: chrono::Duration) -> f64 {
    duration.num_milliseconds() as f64 / 3_600_000.0
}

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    database_path: &Path,
    now: DateTime<Utc>,
) -> Result<()> {
    writeln!(writer, "Work tracker status")?;
    writeln!(writer, "Database: {}", database_path.display())?;
    writeln!(writer, "Events: {}", db.event_count()?)?;

    if let Some(last) = db.last_event()? {
        writeln!(writer, "Last event: {} {}", last.timestamp, last.kind)?;
    }

    let reconstruction = fold_events(load_events(db)?);
    match reconstruction.open {
        None => writeln!(writer, "State: idle")?,
        Some(open) => {
            let state = if open.is_paused() { "paused" } else { "running" };
            writeln!(
                writer,
                "State: {state} since {} ({:.1} h active)",
                open.start.format("%Y-%m-%d %H:%M"),
                hours(open.active_so_far(now))
            )?;
        }
    }

    Ok(())
}
