//! Per-day roster events.
//!
//! These are the structured records the generator produces before any text
//! is rendered, so the date arithmetic can be checked on its own.

use chrono::NaiveDate;

/// Category attached to every roster event.
pub const ROSTER_CATEGORY: &str = "ROSTER";

/// Roster days never block free/busy time.
pub const ROSTER_TRANSPARENCY: &str = "TRANSPARENT";

/// One all-day event marking a single day of a roster cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterDay {
    /// Globally unique id, `roster-YYYYMMDD@domain`
    pub uid: String,
    /// The day this event covers
    pub date: NaiveDate,
    /// Cycle containing `date`; negative before the epoch
    pub cycle: i64,
    /// Position within the cycle, 1 to 28
    pub day_of_cycle: u8,
    /// Date the feed was generated (DTSTAMP)
    pub stamp: NaiveDate,
}

impl RosterDay {
    pub fn new(
        date: NaiveDate,
        cycle: i64,
        day_of_cycle: u8,
        stamp: NaiveDate,
        domain: &str,
    ) -> Self {
        RosterDay {
            uid: format!("roster-{}@{}", compact_date(date), domain),
            date,
            cycle,
            day_of_cycle,
            stamp,
        }
    }

    /// Exclusive end of the all-day event. `None` only for `NaiveDate::MAX`.
    pub fn end(&self) -> Option<NaiveDate> {
        self.date.succ_opt()
    }

    pub fn summary(&self) -> String {
        format!("RC {}, Day {}", self.cycle, self.day_of_cycle)
    }

    pub fn description(&self) -> String {
        format!("Day {} of Roster Cycle {}", self.day_of_cycle, self.cycle)
    }
}

/// Format a date as the 8-digit `YYYYMMDD` token used by iCalendar DATE values.
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_day() -> RosterDay {
        RosterDay::new(
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            355,
            1,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "calendars.gtch.au",
        )
    }

    #[test]
    fn test_compact_date_is_eight_digits() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert_eq!(compact_date(date), "20240108");

        let early = NaiveDate::from_ymd_opt(996, 3, 1).unwrap();
        assert_eq!(compact_date(early), "09960301");
    }

    #[test]
    fn test_roster_day_text() {
        let day = make_test_day();
        assert_eq!(day.uid, "roster-20240108@calendars.gtch.au");
        assert_eq!(day.summary(), "RC 355, Day 1");
        assert_eq!(day.description(), "Day 1 of Roster Cycle 355");
    }

    #[test]
    fn test_end_is_next_day() {
        let day = make_test_day();
        assert_eq!(day.end(), NaiveDate::from_ymd_opt(2024, 1, 9));

        let mut last = make_test_day();
        last.date = NaiveDate::MAX;
        assert_eq!(last.end(), None);
    }
}
