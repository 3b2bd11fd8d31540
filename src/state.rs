use std::sync::Arc;

use chrono::{Local, NaiveDate};
use roster_core::CycleCalendarGenerator;

use crate::config::Settings;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    generator: Arc<CycleCalendarGenerator>,
    pinned_today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        AppState {
            generator: Arc::new(CycleCalendarGenerator::new(settings.roster.clone())),
            pinned_today: settings.today,
        }
    }

    pub fn generator(&self) -> &CycleCalendarGenerator {
        &self.generator
    }

    /// The day feeds are generated for: the pinned day if configured,
    /// otherwise the local date from the system clock.
    pub fn today(&self) -> NaiveDate {
        self.pinned_today.unwrap_or_else(|| Local::now().date_naive())
    }
}
