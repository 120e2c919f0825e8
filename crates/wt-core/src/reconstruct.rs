//! Folds the event log into an ordered list of closed work sessions.
//!
//! The log is an append-only record with no session ids; session
//! boundaries are inferred purely from event ordering and kind. Malformed
//! sequences (PAUSE without START, double START, a trailing open session)
//! are absorbed rather than failing the run: ineffective transitions are
//! dropped, and a START over an open session closes it at the previous
//! event's timestamp.

use chrono::{DateTime, Utc};

use crate::event::{Event, EventKind};
use crate::session::{WorkSession, net_active_time};

/// A session that has started but not yet ended.
///
/// Owned by the fold until closed; exposed so callers can inspect the
/// tracker's live state (e.g. a status display).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSession {
    /// When the session started.
    pub start: DateTime<Utc>,
    /// Start of each pause interval so far.
    pub pauses: Vec<DateTime<Utc>>,
    /// End of each pause interval so far.
    pub resumes: Vec<DateTime<Utc>>,
    /// Labels absorbed so far, in log order.
    pub labels: Vec<String>,
}

impl OpenSession {
    fn begin(event: Event) -> Self {
        Self {
            start: event.timestamp,
            pauses: Vec::new(),
            resumes: Vec::new(),
            labels: vec![event.label],
        }
    }

    /// Whether the session is currently paused (one unmatched pause).
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.pauses.len() > self.resumes.len()
    }

    /// Net active time accrued up to `now`.
    ///
    /// While paused the clock is frozen at the last pause.
    #[must_use]
    pub fn active_so_far(&self, now: DateTime<Utc>) -> chrono::Duration {
        net_active_time(self.start, now, &self.pauses, &self.resumes)
    }

    /// Seals the session at `end`, computing its net duration.
    #[must_use]
    pub fn close_at(self, end: DateTime<Utc>) -> WorkSession {
        let duration = net_active_time(self.start, end, &self.pauses, &self.resumes);
        WorkSession {
            start: self.start,
            end,
            pauses: self.pauses,
            resumes: self.resumes,
            labels: self.labels,
            duration,
        }
    }
}

/// Tracker state threaded through the fold.
enum Tracker {
    Idle,
    Running(OpenSession),
    Paused(OpenSession),
}

impl Tracker {
    fn into_open(self) -> Option<OpenSession> {
        match self {
            Self::Idle => None,
            Self::Running(open) | Self::Paused(open) => Some(open),
        }
    }
}

/// Result of folding an event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    /// Sessions closed during the fold, in start order.
    pub sessions: Vec<WorkSession>,
    /// A session still open when input ran out, if any.
    pub open: Option<OpenSession>,
    /// Timestamp of the last processed event.
    pub last_event: Option<DateTime<Utc>>,
}

/// Sorts the events by timestamp and folds them into sessions.
///
/// Returns the closed sessions together with any still-open session, so
/// callers decide whether to flush it ([`reconstruct_sessions`]) or show
/// it as live state.
pub fn fold_events(mut events: Vec<Event>) -> Reconstruction {
    events.sort_by_key(|event| event.timestamp);

    let mut sessions = Vec::new();
    let mut state = Tracker::Idle;
    let mut last_seen: Option<DateTime<Utc>> = None;

    for event in events {
        let timestamp = event.timestamp;
        state = match (state, event.kind) {
            (Tracker::Idle, EventKind::Start) => Tracker::Running(OpenSession::begin(event)),
            (Tracker::Running(open) | Tracker::Paused(open), EventKind::Start) => {
                // A new START implicitly ends whatever was running. The end
                // is back-dated to the previous event so the gap between
                // the runs is not attributed to the old session.
                sessions.push(open.close_at(last_seen.unwrap_or(timestamp)));
                Tracker::Running(OpenSession::begin(event))
            }
            (Tracker::Running(mut open), EventKind::Pause) => {
                open.pauses.push(timestamp);
                open.labels.push(event.label);
                Tracker::Paused(open)
            }
            (Tracker::Paused(mut open), EventKind::Resume) => {
                open.resumes.push(timestamp);
                open.labels.push(event.label);
                Tracker::Running(open)
            }
            (Tracker::Running(open) | Tracker::Paused(open), EventKind::Stop) => {
                sessions.push(open.close_at(timestamp));
                Tracker::Idle
            }
            (Tracker::Running(mut open), EventKind::Other) => {
                open.labels.push(event.label);
                Tracker::Running(open)
            }
            (Tracker::Paused(mut open), EventKind::Other) => {
                open.labels.push(event.label);
                Tracker::Paused(open)
            }
            // PAUSE when idle or already paused, RESUME when not paused,
            // STOP or OTHER when idle: all dropped.
            (state, _) => state,
        };
        last_seen = Some(timestamp);
    }

    Reconstruction {
        sessions,
        open: state.into_open(),
        last_event: last_seen,
    }
}

/// Reconstructs the complete closed-session list from an unordered event
/// collection.
///
/// A session still open when input runs out is closed at the last event's
/// timestamp.
pub fn reconstruct_sessions(events: Vec<Event>) -> Vec<WorkSession> {
    let mut reconstruction = fold_events(events);
    if let (Some(open), Some(last)) = (reconstruction.open.take(), reconstruction.last_event) {
        reconstruction.sessions.push(open.close_at(last));
    }
    tracing::debug!(
        sessions = reconstruction.sessions.len(),
        "reconstructed sessions"
    );
    reconstruction.sessions
}
