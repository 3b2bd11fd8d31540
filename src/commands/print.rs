use std::io::Write;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use roster_core::CycleCalendarGenerator;

use crate::config::Settings;

/// Write one feed to stdout.
pub fn run(settings: Settings, today: Option<NaiveDate>) -> Result<()> {
    let today = resolve_today(today, settings.today, || Local::now().date_naive());

    let generator = CycleCalendarGenerator::new(settings.roster);
    let feed = generator.generate(today)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(feed.body.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

/// `--today` wins over the pinned day from settings, which wins over the clock.
fn resolve_today(
    requested: Option<NaiveDate>,
    pinned: Option<NaiveDate>,
    clock: impl FnOnce() -> NaiveDate,
) -> NaiveDate {
    requested.or(pinned).unwrap_or_else(clock)
}
