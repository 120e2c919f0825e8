//! Recording commands: the timer's lifecycle transitions.
//!
//! The original timer guarded its buttons with a running/paused state
//! pair, so ineffective presses logged nothing. The CLI derives the same
//! state by folding the stored log, then either appends one event or
//! reports why the action is a no-op.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};

use wt_core::fold_events;
use wt_db::{Database, EventRecord, format_timestamp};

use super::util::load_events;

/// A lifecycle action requested from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Pause,
    Resume,
    Stop,
    Note,
}

impl Action {
    /// Kind string stored for this action.
    const fn kind(self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Pause => "PAUSE",
            Self::Resume => "RESUME",
            Self::Stop => "STOP",
            Self::Note => "NOTE",
        }
    }
}

/// Applies one action against the current tracker state.
pub fn run<W: Write>(
    writer: &mut W,
    db: &mut Database,
    action: Action,
    label: &str,
    now: DateTime<Utc>,
) -> Result<()> {
    let open = fold_events(load_events(db)?).open;

    let effective = match action {
        Action::Start => {
            if open.is_some() {
                writeln!(writer, "A session is already running; stop it first.")?;
                false
            } else {
                true
            }
        }
        Action::Pause => match &open {
            None => {
                writeln!(writer, "No session is running.")?;
                false
            }
            Some(open) if open.is_paused() => {
                writeln!(writer, "Session is already paused.")?;
                false
            }
            Some(_) => true,
        },
        Action::Resume => match &open {
            None => {
                writeln!(writer, "No session is running.")?;
                false
            }
            Some(open) if !open.is_paused() => {
                writeln!(writer, "Session is not paused.")?;
                false
            }
            Some(_) => true,
        },
        Action::Stop => {
            if open.is_none() {
                writeln!(writer, "No session is running.")?;
                false
            } else {
                true
            }
        }
        Action::Note => true,
    };

    if !effective {
        return Ok(());
    }

    db.append_event(&EventRecord {
        timestamp: format_timestamp(now),
        kind: action.kind().to_string(),
        label: label.to_string(),
    })?;
    tracing::debug!(kind = action.kind(), "recorded event");

    match action {
        Action::Start => writeln!(writer, "Started {label:?}.")?,
        Action::Pause => writeln!(writer, "Paused.")?,
        Action::Resume => writeln!(writer, "Resumed.")?,
        Action::Stop => {
            if let Some(open) = open {
                let hours = open.close_at(now).hours();
                writeln!(writer, "Stopped. Net active time: {hours:.1} h.")?;
            }
        }
        Action::Note => writeln!(writer, "Noted.")?,
    }

    Ok(())
}
