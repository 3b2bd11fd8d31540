//! Roster cycle arithmetic.
//!
//! Every date is addressed by its day offset from the epoch. Offsets before
//! the epoch are negative, so all division here is floored (Euclidean) to
//! keep cycle numbers monotonic and days of cycle within 1..=28.

use std::ops::Range;

use chrono::{Days, NaiveDate};

use crate::config::RosterConfig;
use crate::error::{RosterError, RosterResult};

/// Days in one roster cycle.
pub const CYCLE_LENGTH_DAYS: i64 = 28;

/// Largest window a single feed may cover, roughly 77 years of days.
pub const MAX_WINDOW_CYCLES: i64 = 1_000;

/// Whole days from `epoch` to `date`; negative before the epoch.
pub fn days_since(epoch: NaiveDate, date: NaiveDate) -> i64 {
    date.signed_duration_since(epoch).num_days()
}

/// Cycle containing the given day offset.
pub fn cycle_number(day_offset: i64) -> i64 {
    day_offset.div_euclid(CYCLE_LENGTH_DAYS)
}

/// 1-based position of the given day offset within its cycle.
pub fn day_of_cycle(day_offset: i64) -> u8 {
    // rem_euclid is always in 0..28
    (day_offset.rem_euclid(CYCLE_LENGTH_DAYS) + 1) as u8
}

/// Calendar date `day_offset` days after `epoch`.
pub fn date_at(epoch: NaiveDate, day_offset: i64) -> RosterResult<NaiveDate> {
    let days = Days::new(day_offset.unsigned_abs());
    let date = if day_offset >= 0 {
        epoch.checked_add_days(days)
    } else {
        epoch.checked_sub_days(days)
    };

    date.ok_or(RosterError::DateOutOfRange {
        epoch,
        offset: day_offset,
    })
}

/// A run of whole cycles surrounding the cycle that contains "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleWindow {
    pub epoch: NaiveDate,
    /// Cycle containing "today".
    pub current_cycle: i64,
    /// First cycle in the window.
    pub start_cycle: i64,
    /// First cycle after the window (exclusive).
    pub end_cycle: i64,
}

impl CycleWindow {
    /// Window of `cycles_behind` cycles before the current one through
    /// `cycles_ahead` cycles after it.
    pub fn around(config: &RosterConfig, today: NaiveDate) -> Self {
        let current_cycle = cycle_number(days_since(config.epoch, today));

        CycleWindow {
            epoch: config.epoch,
            current_cycle,
            start_cycle: current_cycle - i64::from(config.cycles_behind),
            end_cycle: current_cycle + i64::from(config.cycles_ahead) + 1,
        }
    }

    /// Day offsets covered by the window, in ascending order.
    pub fn day_offsets(&self) -> Range<i64> {
        self.start_cycle * CYCLE_LENGTH_DAYS..self.end_cycle * CYCLE_LENGTH_DAYS
    }

    /// First day of the window.
    pub fn start_date(&self) -> RosterResult<NaiveDate> {
        date_at(self.epoch, self.day_offsets().start)
    }

    /// Day after the last day of the window.
    pub fn end_date(&self) -> RosterResult<NaiveDate> {
        date_at(self.epoch, self.day_offsets().end)
    }

    /// Number of days in the window.
    pub fn len(&self) -> usize {
        ((self.end_cycle - self.start_cycle) * CYCLE_LENGTH_DAYS) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fail unless the window is within `MAX_WINDOW_CYCLES` and both of its
    /// bounds are representable dates.
    pub fn check(&self) -> RosterResult<()> {
        let cycles = self.end_cycle - self.start_cycle;
        if cycles > MAX_WINDOW_CYCLES {
            return Err(RosterError::WindowTooLarge {
                cycles,
                max: MAX_WINDOW_CYCLES,
            });
        }

        self.start_date()?;
        self.end_date()?;

        Ok(())
    }
}
