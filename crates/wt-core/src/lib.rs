//! Core domain logic for the work tracker.
//!
//! This crate turns the flat, append-only event log (START/PAUSE/RESUME/
//! STOP rows with timestamps and labels) back into structured work
//! sessions and daily totals:
//!
//! - Event parsing: typed events from raw log rows
//! - Reconstruction: a fold over the sorted log inferring session
//!   boundaries, tolerant of malformed sequences
//! - Duration accounting: net active time with paused intervals excluded
//! - Aggregation: per-day totals under a pluggable calendar (Solar Hijri
//!   for the reports, Gregorian as the identity mapping)
//!
//! The whole pipeline is pure and single-pass; persistence and rendering
//! live in the `wt-db` and `wt-cli` crates.

pub mod aggregate;
pub mod calendar;
pub mod event;
pub mod reconstruct;
pub mod session;

pub use aggregate::{DailyAggregate, daily_report, group_by_day};
pub use calendar::{CalendarSystem, CivilDate, Gregorian, SolarHijri};
pub use event::{Event, EventKind, ROW_TIME_FORMAT, RowError};
pub use reconstruct::{OpenSession, Reconstruction, fold_events, reconstruct_sessions};
pub use session::{WorkSession, net_active_time};
