//! Roster cycle calendars.
//!
//! This crate computes 28-day roster cycles relative to a fixed epoch and
//! renders a window of them as an iCalendar feed:
//! - `cycle` for the date arithmetic
//! - `generator` for building a feed for a given day
//! - `ics` for the text format

pub mod config;
pub mod cycle;
pub mod error;
pub mod event;
pub mod generator;
pub mod ics;

pub use config::RosterConfig;
pub use error::{RosterError, RosterResult};
pub use event::RosterDay;
pub use generator::{CalendarFeed, CycleCalendarGenerator};
