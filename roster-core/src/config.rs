//! Generator settings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cycle::CycleWindow;
use crate::error::{RosterError, RosterResult};

/// The first roster cycle started on 21 October 1996.
pub const DEFAULT_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1996, 10, 21) {
    Some(date) => date,
    None => panic!("invalid default epoch"),
};

pub const DEFAULT_CYCLES_BEHIND: u32 = 1;
pub const DEFAULT_CYCLES_AHEAD: u32 = 20;
pub const DEFAULT_DOMAIN: &str = "calendars.gtch.au";

/// Immutable settings for one roster schedule.
///
/// Built once at startup and handed to the generator; nothing reads these
/// values from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Day 0 of cycle 0.
    pub epoch: NaiveDate,

    /// Complete cycles to include before the current one.
    pub cycles_behind: u32,

    /// Complete cycles to include after the current one.
    pub cycles_ahead: u32,

    /// Domain used to qualify event UIDs and the PRODID.
    pub domain: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        RosterConfig {
            epoch: DEFAULT_EPOCH,
            cycles_behind: DEFAULT_CYCLES_BEHIND,
            cycles_ahead: DEFAULT_CYCLES_AHEAD,
            domain: DEFAULT_DOMAIN.to_string(),
        }
    }
}

impl RosterConfig {
    /// Total number of cycles covered by one feed.
    pub fn window_cycles(&self) -> i64 {
        i64::from(self.cycles_behind) + i64::from(self.cycles_ahead) + 1
    }

    /// The PRODID value advertised in every feed.
    pub fn product_id(&self) -> String {
        format!("-//{}//Roster-Cycles-v1//EN", self.domain)
    }

    /// Check that the settings can produce a well-formed feed.
    pub fn validate(&self) -> RosterResult<()> {
        if self.domain.is_empty() {
            return Err(RosterError::Config("domain must not be empty".into()));
        }

        if self
            .domain
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(RosterError::Config(format!(
                "domain '{}' must not contain whitespace or control characters",
                self.domain.escape_debug()
            )));
        }

        CycleWindow::around(self, self.epoch).check()
    }
}

/// Parse a YYYY-MM-DD date.
pub fn parse_date(s: &str) -> RosterResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        RosterError::InvalidDate(format!("'{}'. Expected YYYY-MM-DD", s))
    })
}
