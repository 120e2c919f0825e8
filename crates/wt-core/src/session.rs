//! Closed work sessions and net active-time accounting.

use chrono::{DateTime, Duration, Utc};

/// A reconstructed work session, closed and immutable.
///
/// `pauses` and `resumes` are parallel, monotonically non-decreasing
/// sequences inside `[start, end]`. A session terminated while paused
/// carries one more pause than resume; otherwise the two are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSession {
    /// When the session started.
    pub start: DateTime<Utc>,
    /// When the session ended (explicitly, implicitly, or at end of log).
    pub end: DateTime<Utc>,
    /// Start of each pause interval.
    pub pauses: Vec<DateTime<Utc>>,
    /// End of each pause interval.
    pub resumes: Vec<DateTime<Utc>>,
    /// Labels from every row the session absorbed, in log order.
    pub labels: Vec<String>,
    /// Net active time, paused intervals excluded.
    pub duration: Duration,
}

impl WorkSession {
    /// Net active time in hours.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hours(&self) -> f64 {
        self.duration.num_milliseconds() as f64 / 3_600_000.0
    }

    /// Labels deduplicated in first-occurrence order.
    ///
    /// Reconstruction keeps every row's label; display-level consumers
    /// collapse the repeats.
    #[must_use]
    pub fn unique_labels(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for label in &self.labels {
            if !seen.contains(&label.as_str()) {
                seen.push(label.as_str());
            }
        }
        seen
    }
}

/// Computes net active time for a closed session, excluding paused
/// intervals.
///
/// A cursor walks from `start` through each pause/resume pair: time up to
/// a pause is counted, time from the pause to its resume is not. Pauses
/// behind the cursor are ignored, and a resume that does not move the
/// clock forward leaves the cursor at its pause. If the session ended
/// while paused (one more pause than resume), nothing after the final
/// pause is counted.
///
/// The result is never negative.
#[must_use]
pub fn net_active_time(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    pauses: &[DateTime<Utc>],
    resumes: &[DateTime<Utc>],
) -> Duration {
    let mut total = Duration::zero();
    let mut cursor = start;

    for (i, &pause) in pauses.iter().enumerate() {
        if pause < cursor {
            // Out-of-order pause; ignore.
            continue;
        }
        total = total + (pause - cursor);
        cursor = pause;
        if let Some(&resume) = resumes.get(i) {
            if resume > pause {
                cursor = resume;
            }
        }
    }

    // Trailing active interval only if the session was not paused at close.
    if pauses.len() == resumes.len() && end > cursor {
        total = total + (end - cursor);
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0)
            .single()
            .expect("valid test timestamp")
            + Duration::minutes(minutes)
    }

    fn session(
        start: i64,
        end: i64,
        pauses: &[i64],
        resumes: &[i64],
    ) -> WorkSession {
        let pauses: Vec<_> = pauses.iter().map(|&m| ts(m)).collect();
        let resumes: Vec<_> = resumes.iter().map(|&m| ts(m)).collect();
        let duration = net_active_time(ts(start), ts(end), &pauses, &resumes);
        WorkSession {
            start: ts(start),
            end: ts(end),
            pauses,
            resumes,
            labels: Vec::new(),
            duration,
        }
    }

    #[test]
    fn no_pauses_is_end_minus_start() {
        let duration = net_active_time(ts(0), ts(90), &[], &[]);
        assert_eq!(duration, Duration::minutes(90));
    }

    #[test]
    fn paused_interval_is_excluded() {
        // START@0, PAUSE@30, RESUME@45, STOP@60 -> 30 + 15
        let duration = net_active_time(ts(0), ts(60), &[ts(30)], &[ts(45)]);
        assert_eq!(duration, Duration::minutes(45));
    }

    #[test]
    fn multiple_pause_cycles() {
        let duration = net_active_time(
            ts(0),
            ts(100),
            &[ts(10), ts(50)],
            &[ts(20), ts(70)],
        );
        // 10 + 30 + 30
        assert_eq!(duration, Duration::minutes(70));
    }

    #[test]
    fn unclosed_pause_stops_the_clock() {
        // START@0, PAUSE@30, STOP@90 -> time after the pause is excluded.
        let duration = net_active_time(ts(0), ts(90), &[ts(30)], &[]);
        assert_eq!(duration, Duration::minutes(30));
    }

    #[test]
    fn out_of_order_pause_is_ignored() {
        // Second pause lies behind the cursor advanced by the first resume.
        let duration = net_active_time(
            ts(0),
            ts(60),
            &[ts(20), ts(25)],
            &[ts(40), ts(45)],
        );
        // 20 active, then 40..60 active; the pause at 25 is stale.
        assert_eq!(duration, Duration::minutes(40));
    }

    #[test]
    fn resume_not_after_pause_leaves_cursor_at_pause() {
        let duration = net_active_time(ts(0), ts(60), &[ts(30)], &[ts(30)]);
        // 30 active, cursor stays at the pause, then 30..60 active.
        assert_eq!(duration, Duration::minutes(60));
    }

    #[test]
    fn zero_length_session() {
        let duration = net_active_time(ts(10), ts(10), &[], &[]);
        assert_eq!(duration, Duration::zero());
    }

    #[test]
    fn duration_never_negative_and_bounded() {
        let sessions = [
            session(0, 60, &[30], &[45]),
            session(0, 90, &[30], &[]),
            session(0, 0, &[], &[]),
            session(0, 100, &[10, 50], &[20, 70]),
        ];
        for s in &sessions {
            assert!(s.duration >= Duration::zero());
            assert!(s.duration <= s.end - s.start);
        }
    }

    #[test]
    fn hours_converts_milliseconds() {
        let s = session(0, 90, &[], &[]);
        assert!((s.hours() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unique_labels_keeps_first_occurrence_order() {
        let mut s = session(0, 60, &[], &[]);
        s.labels = vec![
            "alpha".to_string(),
            "beta".to_string(),
            "alpha".to_string(),
            "gamma".to_string(),
            "beta".to_string(),
        ];
        assert_eq!(s.unique_labels(), vec!["alpha", "beta", "gamma"]);
    }
}
