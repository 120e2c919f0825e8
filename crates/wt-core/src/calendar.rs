//! Calendar-date mapping for grouping sessions by day.
//!
//! Aggregation is calendar-agnostic: it only needs an instant mapped to a
//! `(year, month, day)` triple. The Solar Hijri mapping the reports use is
//! supplied by ICU4X at this seam; a plain Gregorian mapping doubles as
//! the identity calendar for tests.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use icu_calendar::Date;
use icu_calendar::persian::Persian;

/// A year-month-day triple in some calendar system.
///
/// Ordering is by value (year, then month, then day), so sorting does not
/// depend on string formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Maps an instant to a calendar date.
pub trait CalendarSystem {
    /// The calendar date containing `instant`.
    fn date_of(&self, instant: DateTime<Utc>) -> CivilDate;

    /// Short identifier used in report headers.
    fn name(&self) -> &'static str;
}

/// Gregorian civil calendar (identity mapping).
#[derive(Debug, Clone, Copy, Default)]
pub struct Gregorian;

impl CalendarSystem for Gregorian {
    #[allow(clippy::cast_possible_truncation)]
    fn date_of(&self, instant: DateTime<Utc>) -> CivilDate {
        let date = instant.date_naive();
        CivilDate {
            year: date.year(),
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }

    fn name(&self) -> &'static str {
        "gregorian"
    }
}

/// Solar Hijri calendar, converted through ICU4X.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarHijri;

impl CalendarSystem for SolarHijri {
    #[allow(clippy::cast_possible_truncation)]
    fn date_of(&self, instant: DateTime<Utc>) -> CivilDate {
        let date = instant.date_naive();
        let iso = Date::try_new_iso_date(date.year(), date.month() as u8, date.day() as u8)
            .expect("chrono dates are valid ISO dates");
        let persian = iso.to_calendar(Persian);
        CivilDate {
            year: persian.year().number,
            month: persian.month().ordinal as u8,
            day: persian.day_of_month().0 as u8,
        }
    }

    fn name(&self) -> &'static str {
        "solar hijri"
    }
}
