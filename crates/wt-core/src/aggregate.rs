//! Daily aggregation of closed work sessions.

use std::collections::BTreeMap;

use crate::calendar::{CalendarSystem, CivilDate};
use crate::event::Event;
use crate::reconstruct::reconstruct_sessions;
use crate::session::WorkSession;

/// All sessions that started on one calendar day, with their summed net
/// hours.
///
/// Sessions are kept as distinct entries even when their labels repeat;
/// display-level deduplication is the renderer's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    /// The day, in the target calendar.
    pub date: CivilDate,
    /// Sum of net hours over `sessions`.
    pub total_hours: f64,
    /// Sessions in start order.
    pub sessions: Vec<WorkSession>,
}

/// Groups closed sessions by the calendar day of their start.
///
/// Aggregates come back ascending by date value.
pub fn group_by_day<C: CalendarSystem>(
    sessions: Vec<WorkSession>,
    calendar: &C,
) -> Vec<DailyAggregate> {
    let mut days: BTreeMap<CivilDate, DailyAggregate> = BTreeMap::new();
    for session in sessions {
        let date = calendar.date_of(session.start);
        let day = days.entry(date).or_insert_with(|| DailyAggregate {
            date,
            total_hours: 0.0,
            sessions: Vec::new(),
        });
        day.total_hours += session.hours();
        day.sessions.push(session);
    }
    days.into_values().collect()
}

/// Full pipeline: sort and reconstruct the events, then aggregate by day.
///
/// This is the core's entry point: any collection of events, in any
/// order, maps to an ordered list of daily aggregates. Zero events yield
/// zero aggregates.
pub fn daily_report<C: CalendarSystem>(events: Vec<Event>, calendar: &C) -> Vec<DailyAggregate> {
    let aggregates = group_by_day(reconstruct_sessions(events), calendar);
    tracing::debug!(days = aggregates.len(), "aggregated daily report");
    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Gregorian, SolarHijri};
    use crate::event::EventKind;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, minute, 0)
            .single()
            .expect("valid test timestamp")
    }

    fn ev(timestamp: DateTime<Utc>, kind: EventKind, label: &str) -> Event {
        Event {
            timestamp,
            kind,
            label: label.to_string(),
        }
    }

    #[test]
    fn sessions_on_same_day_share_an_aggregate() {
        let events = vec![
            ev(at(20, 9, 0), EventKind::Start, "morning"),
            ev(at(20, 10, 0), EventKind::Stop, ""),
            ev(at(20, 14, 0), EventKind::Start, "afternoon"),
            ev(at(20, 16, 30), EventKind::Stop, ""),
        ];
        let days = daily_report(events, &Gregorian);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].sessions.len(), 2);
        assert!((days[0].total_hours - 3.5).abs() < 1e-9);
    }

    #[test]
    fn sessions_on_different_days_split_and_sort() {
        let events = vec![
            ev(at(21, 9, 0), EventKind::Start, "later"),
            ev(at(21, 10, 0), EventKind::Stop, ""),
            ev(at(20, 9, 0), EventKind::Start, "earlier"),
            ev(at(20, 11, 0), EventKind::Stop, ""),
        ];
        let days = daily_report(events, &Gregorian);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date.day, 20);
        assert_eq!(days[1].date.day, 21);
    }

    #[test]
    fn solar_hijri_year_boundary_sorts_by_value() {
        // 2024-03-19 is 29 Esfand 1402; 2024-03-20 is 1 Farvardin 1403.
        let events = vec![
            ev(at(20, 9, 0), EventKind::Start, "new year"),
            ev(at(20, 10, 0), EventKind::Stop, ""),
            ev(at(19, 9, 0), EventKind::Start, "old year"),
            ev(at(19, 10, 0), EventKind::Stop, ""),
        ];
        let days = daily_report(events, &SolarHijri);
        assert_eq!(days.len(), 2);
        assert_eq!((days[0].date.year, days[0].date.month), (1402, 12));
        assert_eq!((days[1].date.year, days[1].date.month), (1403, 1));
    }

    #[test]
    fn total_hours_matches_session_sum() {
        let events = vec![
            ev(at(20, 9, 0), EventKind::Start, "a"),
            ev(at(20, 9, 45), EventKind::Pause, ""),
            ev(at(20, 10, 0), EventKind::Resume, ""),
            ev(at(20, 11, 0), EventKind::Stop, ""),
            ev(at(20, 12, 0), EventKind::Start, "b"),
            ev(at(20, 12, 20), EventKind::Stop, ""),
        ];
        let days = daily_report(events, &Gregorian);
        assert_eq!(days.len(), 1);
        let summed: f64 = days[0].sessions.iter().map(WorkSession::hours).sum();
        assert!((days[0].total_hours - summed).abs() < 1e-9);
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let days = daily_report(Vec::new(), &Gregorian);
        assert!(days.is_empty());
    }

    #[test]
    fn grouping_uses_session_start_day() {
        // A session that runs past midnight lands on its start day.
        let events = vec![
            ev(at(20, 23, 0), EventKind::Start, "late"),
            ev(at(21, 1, 0), EventKind::Stop, ""),
        ];
        let days = daily_report(events, &Gregorian);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date.day, 20);
        assert!((days[0].total_hours - 2.0).abs() < 1e-9);
    }
}
