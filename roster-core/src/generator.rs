//! Roster cycle feed generation.

use std::time::Duration;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::RosterConfig;
use crate::cycle::{CycleWindow, cycle_number, date_at, day_of_cycle};
use crate::error::RosterResult;
use crate::event::RosterDay;
use crate::ics::generate_ics;

pub const CALENDAR_CONTENT_TYPE: &str = "text/calendar";

/// How long a feed stays fresh. The window only moves when a new cycle
/// starts, so one refresh a day is plenty.
pub const FEED_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24);

/// A rendered feed plus the metadata a transport needs to serve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarFeed {
    pub body: String,
    pub content_type: &'static str,
    pub max_age: Duration,
}

/// Builds roster cycle calendars for a given "today".
#[derive(Debug, Clone)]
pub struct CycleCalendarGenerator {
    config: RosterConfig,
}

impl CycleCalendarGenerator {
    pub fn new(config: RosterConfig) -> Self {
        CycleCalendarGenerator { config }
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// One event per day of the window around `today`, in date order.
    pub fn events(&self, today: NaiveDate) -> RosterResult<Vec<RosterDay>> {
        let window = CycleWindow::around(&self.config, today);
        window.check()?;

        debug!(
            current_cycle = window.current_cycle,
            start_cycle = window.start_cycle,
            end_cycle = window.end_cycle,
            days = window.len(),
            "computed roster window"
        );

        window
            .day_offsets()
            .map(|offset| -> RosterResult<RosterDay> {
                let date = date_at(self.config.epoch, offset)?;
                Ok(RosterDay::new(
                    date,
                    cycle_number(offset),
                    day_of_cycle(offset),
                    today,
                    &self.config.domain,
                ))
            })
            .collect()
    }

    /// Render the complete feed for `today`.
    pub fn generate(&self, today: NaiveDate) -> RosterResult<CalendarFeed> {
        let days = self.events(today)?;
        let body = generate_ics(&self.config, &days)?;

        Ok(CalendarFeed {
            body,
            content_type: CALENDAR_CONTENT_TYPE,
            max_age: FEED_MAX_AGE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{CYCLE_LENGTH_DAYS, days_since};
    use crate::error::RosterError;
    use crate::event::compact_date;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_scenario_2024_01_15() {
        let generator = CycleCalendarGenerator::new(RosterConfig::default());
        let today = date(2024, 1, 15);

        let events = generator.events(today).unwrap();
        assert_eq!(events.len(), 22 * 28);

        let window = CycleWindow::around(generator.config(), today);
        let start = window.start_date().unwrap();
        let first = events.iter().find(|e| e.date == start).unwrap();
        assert_eq!(first.day_of_cycle, 1);
        assert_eq!(
            first.uid,
            format!("roster-{}@calendars.gtch.au", compact_date(start))
        );
        assert_eq!(first.uid, "roster-20231211@calendars.gtch.au");
        assert_eq!(first.cycle, 354);

        let today_event = events.iter().find(|e| e.date == today).unwrap();
        assert_eq!(today_event.cycle, 355);
        assert_eq!(today_event.day_of_cycle, 8);
        assert_eq!(today_event.summary(), "RC 355, Day 8");
    }

    #[test]
    fn test_events_are_contiguous_and_consistent() {
        let config = RosterConfig::default();
        let generator = CycleCalendarGenerator::new(config.clone());
        let events = generator.events(date(2031, 6, 30)).unwrap();

        for event in &events {
            assert!((1..=28).contains(&event.day_of_cycle));
            assert_eq!(
                event.cycle,
                days_since(config.epoch, event.date).div_euclid(CYCLE_LENGTH_DAYS)
            );
            assert_eq!(event.end(), event.date.succ_opt());
            assert_eq!(event.stamp, date(2031, 6, 30));
        }

        for pair in events.windows(2) {
            assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }

        assert_eq!(events.first().unwrap().day_of_cycle, 1);
        assert_eq!(events.last().unwrap().day_of_cycle, 28);
    }

    #[test]
    fn test_event_count_for_every_day_in_a_cycle() {
        let config = RosterConfig {
            cycles_behind: 0,
            cycles_ahead: 2,
            ..RosterConfig::default()
        };
        let generator = CycleCalendarGenerator::new(config);

        let mut today = date(2024, 1, 1);
        for _ in 0..CYCLE_LENGTH_DAYS {
            assert_eq!(generator.events(today).unwrap().len(), 3 * 28);
            today = today.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_window_reaching_before_epoch() {
        let config = RosterConfig {
            cycles_behind: 2,
            cycles_ahead: 0,
            ..RosterConfig::default()
        };
        let generator = CycleCalendarGenerator::new(config.clone());
        let events = generator.events(config.epoch).unwrap();

        assert_eq!(events.len(), 3 * 28);
        assert_eq!(events[0].cycle, -2);
        assert_eq!(events[0].day_of_cycle, 1);
        assert_eq!(events[0].summary(), "RC -2, Day 1");
        assert_eq!(events[55].cycle, -1);
        assert_eq!(events[55].day_of_cycle, 28);
        assert_eq!(events[56].date, config.epoch);
        assert_eq!(events[56].cycle, 0);
    }

    #[test]
    fn test_oversized_window_fails_before_enumerating() {
        let generator = CycleCalendarGenerator::new(RosterConfig {
            cycles_ahead: u32::MAX,
            ..RosterConfig::default()
        });

        assert!(matches!(
            generator.events(date(2024, 1, 15)),
            Err(RosterError::WindowTooLarge { .. })
        ));
        assert!(generator.generate(date(2024, 1, 15)).is_err());
    }

    #[test]
    fn test_window_past_last_date_fails() {
        let generator = CycleCalendarGenerator::new(RosterConfig::default());
        assert!(matches!(
            generator.events(NaiveDate::MAX),
            Err(RosterError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_generate_feed() {
        let generator = CycleCalendarGenerator::new(RosterConfig::default());
        let feed = generator.generate(date(2024, 1, 15)).unwrap();

        assert_eq!(feed.content_type, "text/calendar");
        assert_eq!(feed.max_age.as_secs(), 86400);

        let body = &feed.body;
        assert_eq!(body.matches("BEGIN:VCALENDAR").count(), 1);
        assert_eq!(body.matches("END:VCALENDAR").count(), 1);
        assert_eq!(body.matches("BEGIN:VEVENT").count(), 616);
        assert_eq!(body.matches("END:VEVENT").count(), 616);
        assert!(body.contains("UID:roster-20231211@calendars.gtch.au\r\n"));
        assert!(body.contains("DTSTAMP:20240115T000000\r\n"));

        // Every line feed is preceded by a carriage return and vice versa
        assert_eq!(body.matches('\n').count(), body.matches("\r\n").count());
        assert_eq!(body.matches('\r').count(), body.matches("\r\n").count());
        assert!(body.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let generator = CycleCalendarGenerator::new(RosterConfig::default());
        let today = date(2025, 2, 28);
        assert_eq!(
            generator.generate(today).unwrap(),
            generator.generate(today).unwrap()
        );
    }

    #[test]
    fn test_dates_in_ascending_order_in_body() {
        let generator = CycleCalendarGenerator::new(RosterConfig {
            cycles_ahead: 1,
            ..RosterConfig::default()
        });
        let body = generator.generate(date(2024, 1, 15)).unwrap().body;

        let starts: Vec<&str> = body
            .split("\r\n")
            .filter_map(|l| l.strip_prefix("DTSTART:"))
            .collect();
        assert_eq!(starts.len(), 3 * 28);
        assert!(starts.windows(2).all(|w| w[0] < w[1]));
    }
}
