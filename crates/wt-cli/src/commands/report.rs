//! Report command: the per-day work report.
//!
//! Runs the full core pipeline over the stored log and renders one block
//! per calendar day, or a JSON view of the same data.

use std::fmt::Write as _;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use wt_core::{CalendarSystem, DailyAggregate, Gregorian, SolarHijri, WorkSession, daily_report};
use wt_db::Database;

use super::util::load_events;
use crate::config::CalendarChoice;

/// Builds the daily aggregates under the chosen calendar.
fn build_report(
    db: &Database,
    calendar: CalendarChoice,
) -> Result<(Vec<DailyAggregate>, &'static str)> {
    let events = load_events(db)?;
    let report = match calendar {
        CalendarChoice::SolarHijri => (daily_report(events, &SolarHijri), SolarHijri.name()),
        CalendarChoice::Gregorian => (daily_report(events, &Gregorian), Gregorian.name()),
    };
    Ok(report)
}

/// Session labels for display: deduplicated, empties dropped.
fn display_labels(session: &WorkSession) -> String {
    let labels: Vec<&str> = session
        .unique_labels()
        .into_iter()
        .filter(|label| !label.is_empty())
        .collect();
    if labels.is_empty() {
        "(unlabeled)".to_string()
    } else {
        labels.join(", ")
    }
}

/// Formats the human-readable report.
pub fn format_report(days: &[DailyAggregate], calendar_name: &str) -> String {
    let mut output = String::new();
    writeln!(output, "WORK REPORT ({calendar_name})").unwrap();

    if days.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No events recorded.").unwrap();
        return output;
    }

    for day in days {
        writeln!(output).unwrap();
        writeln!(output, "{}  total {:.1} h", day.date, day.total_hours).unwrap();
        for session in &day.sessions {
            writeln!(
                output,
                "  {}-{}  {:.1} h  {}",
                session.start.format("%H:%M"),
                session.end.format("%H:%M"),
                session.hours(),
                display_labels(session)
            )
            .unwrap();
        }
    }

    output
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub calendar: String,
    pub total_hours: f64,
    pub days: Vec<JsonDay>,
}

#[derive(Debug, Serialize)]
pub struct JsonDay {
    pub date: String,
    pub total_hours: f64,
    pub sessions: Vec<JsonSession>,
}

#[derive(Debug, Serialize)]
pub struct JsonSession {
    pub start: String,
    pub end: String,
    pub hours: f64,
    pub labels: Vec<String>,
}

/// Formats the report as JSON.
pub fn format_report_json(
    days: &[DailyAggregate],
    calendar_name: &str,
    generated_at: DateTime<Utc>,
) -> Result<String> {
    let report = JsonReport {
        generated_at: generated_at.to_rfc3339(),
        calendar: calendar_name.to_string(),
        total_hours: days.iter().map(|day| day.total_hours).sum(),
        days: days
            .iter()
            .map(|day| JsonDay {
                date: day.date.to_string(),
                total_hours: day.total_hours,
                sessions: day
                    .sessions
                    .iter()
                    .map(|session| JsonSession {
                        start: session.start.to_rfc3339(),
                        end: session.end.to_rfc3339(),
                        hours: session.hours(),
                        labels: session
                            .unique_labels()
                            .into_iter()
                            .filter(|label| !label.is_empty())
                            .map(String::from)
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Runs the report command.
pub fn run<W: std::io::Write>(
    writer: &mut W,
    db: &Database,
    calendar: CalendarChoice,
    json: bool,
) -> Result<()> {
    let (days, calendar_name) = build_report(db, calendar)?;
    if json {
        writeln!(
            writer,
            "{}",
            format_report_json(&days, calendar_name, Utc::now())?
        )?;
    } else {
        write!(writer, "{}", format_report(&days, calendar_name))?;
    }
    Ok(())
}
